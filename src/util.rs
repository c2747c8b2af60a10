use crate::network::Points;
use float_cmp::{approx_eq, F64Margin};
use ndarray::prelude::*;
use num::complex::Complex64;

pub fn comp_line(exemplar: &str, calc: &str, test: &str) {
    let mut i: usize = 0;
    let mut exemplar_iter = exemplar.lines();
    let mut calc_iter = calc.lines();
    loop {
        let exemplar_line = exemplar_iter.next();
        let calc_line = calc_iter.next();
        match (exemplar_line, calc_line) {
            (None, None) => break,
            (Some(e), Some(c)) => {
                i += 1;
                assert!(
                    e == c,
                    "test {} line {} does not match\n  exemplar: {}\n      calc: {}",
                    test,
                    i,
                    e,
                    c
                );
            }
            _ => panic!("test {} number of lines does not match >{}", test, i),
        }
    }
}

pub fn comp_points_c64(exemplar: &Points, calc: &Points, precision: F64Margin, test: &str) {
    assert_eq!(exemplar.dim(), calc.dim(), "test {} shape mismatch", test);
    for ((i, j, k), e) in exemplar.indexed_iter() {
        comp_f64(
            &e.re,
            &calc[(i, j, k)].re,
            precision,
            test,
            &format!("({},{},{}).re", i, j, k),
        );
        comp_f64(
            &e.im,
            &calc[(i, j, k)].im,
            precision,
            test,
            &format!("({},{},{}).im", i, j, k),
        );
    }
}

pub fn comp_point_c64(
    exemplar: &ArrayView2<Complex64>,
    calc: &ArrayView2<Complex64>,
    precision: F64Margin,
    test: &str,
) {
    assert_eq!(exemplar.dim(), calc.dim(), "test {} shape mismatch", test);
    for ((j, k), e) in exemplar.indexed_iter() {
        comp_f64(&e.re, &calc[(j, k)].re, precision, test, &format!("({},{}).re", j, k));
        comp_f64(&e.im, &calc[(j, k)].im, precision, test, &format!("({},{}).im", j, k));
    }
}

pub fn comp_c64(exemplar: &Complex64, calc: &Complex64, precision: F64Margin, test: &str) {
    comp_f64(&exemplar.re, &calc.re, precision, test, "re");
    comp_f64(&exemplar.im, &calc.im, precision, test, "im");
}

pub fn comp_f64(exemplar: &f64, calc: &f64, precision: F64Margin, test: &str, idx: &str) {
    assert!(
        approx_eq!(f64, *exemplar, *calc, precision),
        " Failed test {} at location {}\n  exemplar: {}\n      calc: {}",
        test,
        idx,
        exemplar,
        calc
    );
}
