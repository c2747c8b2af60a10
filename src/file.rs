//! Touchstone file reading and writing
//!
//! Version 1 files (`.sNp`) and the common Version 2 keywords are read. Files
//! are always written as Version 1 S-parameters.

use crate::enums::{RFDataFormat, RFParameter, Unit};
use crate::error::{DeembedError, Result};
use crate::frequency::Frequency;
use crate::network::{Network, NetworkBuilder, Points};
use num::complex::{c64, Complex64};
use regex::Regex;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Number of ports implied by a touchstone file name.
///
/// `.sNp` gives `N`; `.ts` gives `0` and the count comes from `[Number of Ports]`.
pub fn nports_from_path(path: &Path) -> Result<usize> {
    let re_ext = Regex::new(r"(?i)^s(\d+)p$").expect("Invalid regex!");
    let name = path.display().to_string();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| DeembedError::file_format(&name, None, "missing .sNp extension"))?;

    if ext.eq_ignore_ascii_case("ts") {
        return Ok(0);
    }
    let caps = re_ext.captures(ext).ok_or_else(|| {
        DeembedError::file_format(&name, None, format!("'.{}' is not a touchstone extension", ext))
    })?;
    let nports: usize = caps[1]
        .parse()
        .map_err(|_| DeembedError::file_format(&name, None, "port count out of range"))?;
    if nports == 0 {
        return Err(DeembedError::file_format(&name, None, "port count must be at least 1"));
    }
    Ok(nports)
}

/// Read a touchstone file into a [`Network`] of S-parameters
pub fn read_touchstone<P: AsRef<Path>>(path: P) -> Result<Network> {
    let path = path.as_ref();
    let nports = nports_from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| DeembedError::io(path, e))?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let net = parse(&content, nports, &path.display().to_string(), name)?;
    debug!(
        path = %path.display(),
        nports = net.nports(),
        npts = net.npts(),
        "read touchstone file"
    );
    Ok(net)
}

/// Parse touchstone content held in memory.
///
/// `nports` is normally derived from the file extension; pass `0` for
/// Version 2 content that declares `[Number of Ports]`.
pub fn parse_touchstone(content: &str, nports: usize, name: &str) -> Result<Network> {
    parse(content, nports, name, name)
}

fn parse(content: &str, nports: usize, source: &str, name: &str) -> Result<Network> {
    let re_option = Regex::new(r"^#\s*(.*)$").expect("Invalid regex!");
    let re_keyword = Regex::new(r"^\[([^\]]+)\]\s*(.*)$").expect("Invalid regex!");

    let mut state = ParserState::new(nports, source);

    for (i, raw) in content.lines().enumerate() {
        let line_no = i + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('!') {
            if state.freqs.is_empty() && state.values.is_empty() {
                state.comments.push(comment.trim().to_string());
            }
            continue;
        }

        // Inline comment after data or keywords
        let line = match line.find('!') {
            Some(idx) => line[..idx].trim_end(),
            None => line,
        };

        if let Some(caps) = re_keyword.captures(line) {
            if state.keyword(&caps[1], caps[2].trim(), line_no)? {
                break;
            }
            continue;
        }

        if let Some(caps) = re_option.captures(line) {
            if state.option_seen {
                warn!(source, line = line_no, "ignoring repeated option line");
            } else {
                state.option_line(&caps[1], line_no)?;
            }
            continue;
        }

        if state.expecting_reference {
            state.reference_values(line, line_no)?;
            continue;
        }

        if state.data_line(line, line_no)? {
            break;
        }
    }

    state.finish(name)
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum TwoPortOrder {
    // S11 S21 S12 S22, the Version 1 layout
    Order21_12,
    // S11 S12 S21 S22
    Order12_21,
}

struct ParserState<'a> {
    source: &'a str,
    nports: usize,
    unit: Unit,
    param: RFParameter,
    format: RFDataFormat,
    reference: f64,
    z0: Vec<f64>,
    comments: Vec<String>,
    option_seen: bool,
    version2: bool,
    order: TwoPortOrder,
    expecting_reference: bool,
    nfreq_check: Option<usize>,
    values: Vec<f64>,
    freqs: Vec<f64>,
    data: Vec<Complex64>,
}

impl<'a> ParserState<'a> {
    fn new(nports: usize, source: &'a str) -> Self {
        ParserState {
            source,
            nports,
            unit: Unit::Giga,
            param: RFParameter::S,
            format: RFDataFormat::MA,
            reference: 50.0,
            z0: vec![],
            comments: vec![],
            option_seen: false,
            version2: false,
            order: TwoPortOrder::Order21_12,
            expecting_reference: false,
            nfreq_check: None,
            values: vec![],
            freqs: vec![],
            data: vec![],
        }
    }

    fn error(&self, line: usize, message: impl Into<String>) -> DeembedError {
        DeembedError::file_format(self.source, Some(line), message)
    }

    // Tokens may come in any order: <unit> <parameter> <format> R <value>
    fn option_line(&mut self, body: &str, line: usize) -> Result<()> {
        let mut tokens = body.split_whitespace();
        while let Some(token) = tokens.next() {
            if let Ok(unit) = Unit::from_option_str(token) {
                self.unit = unit;
            } else if let Ok(format) = token.parse::<RFDataFormat>() {
                self.format = format;
            } else if token.eq_ignore_ascii_case("r") {
                let value = tokens
                    .next()
                    .ok_or_else(|| self.error(line, "option line 'R' without a value"))?;
                self.reference = self.impedance(value, line)?;
            } else {
                self.param = RFParameter::from_option_str(token)
                    .map_err(|e| self.error(line, format!("option line token '{}': {}", token, e)))?;
            }
        }
        self.option_seen = true;
        Ok(())
    }

    // Returns true once no more network data can follow
    fn keyword(&mut self, keyword: &str, rest: &str, line: usize) -> Result<bool> {
        let keyword = keyword.to_lowercase();
        // A short [Reference] list ends at the next keyword
        if keyword != "reference" {
            self.expecting_reference = false;
        }
        match keyword.as_str() {
            "version" => {
                self.version2 = true;
            }
            "number of ports" => {
                self.nports = rest
                    .parse()
                    .map_err(|_| self.error(line, format!("invalid port count '{}'", rest)))?;
            }
            "two-port data order" => {
                self.order = match rest {
                    "21_12" => TwoPortOrder::Order21_12,
                    "12_21" => TwoPortOrder::Order12_21,
                    _ => return Err(self.error(line, format!("invalid two-port data order '{}'", rest))),
                };
            }
            "number of frequencies" => {
                self.nfreq_check = Some(
                    rest.parse()
                        .map_err(|_| self.error(line, format!("invalid frequency count '{}'", rest)))?,
                );
            }
            "reference" => {
                self.z0.clear();
                self.reference_values(rest, line)?;
            }
            "matrix format" => {
                if !rest.eq_ignore_ascii_case("full") {
                    return Err(self.error(line, format!("matrix format '{}' is not supported", rest)));
                }
            }
            "network data" | "number of noise frequencies" | "network type" => {}
            "noise data" | "end" => return Ok(true),
            _ => warn!(source = self.source, line, "ignoring touchstone keyword [{}]", keyword),
        }
        Ok(false)
    }

    fn impedance(&self, token: &str, line: usize) -> Result<f64> {
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
            _ => Err(self.error(
                line,
                format!("reference impedance '{}' must be a positive number", token),
            )),
        }
    }

    fn reference_values(&mut self, text: &str, line: usize) -> Result<()> {
        for token in text.split_whitespace() {
            let value = self.impedance(token, line)?;
            self.z0.push(value);
        }
        self.expecting_reference = self.z0.len() < self.nports;
        Ok(())
    }

    fn record_len(&self) -> usize {
        1 + 2 * self.nports * self.nports
    }

    // Returns true when the line starts a noise parameter block
    fn data_line(&mut self, line: &str, line_no: usize) -> Result<bool> {
        if self.nports == 0 {
            return Err(self.error(line_no, "number of ports is unknown"));
        }

        let mut tokens = Vec::new();
        for token in line.split_whitespace() {
            let value: f64 = token
                .parse()
                .map_err(|_| self.error(line_no, format!("expected a number, found '{}'", token)))?;
            tokens.push(value);
        }

        // Version 1 two-port files append noise data whose frequencies restart
        if self.values.is_empty() && !self.version2 && self.nports == 2 {
            if let (Some(first), Some(last)) = (tokens.first(), self.freqs.last()) {
                if first * self.unit.scale() <= *last {
                    debug!(source = self.source, line = line_no, "noise data block skipped");
                    return Ok(true);
                }
            }
        }

        self.values.extend(tokens);
        let record_len = self.record_len();
        while self.values.len() >= record_len {
            let record: Vec<f64> = self.values.drain(..record_len).collect();
            let freq = record[0] * self.unit.scale();
            if let Some(last) = self.freqs.last() {
                if freq <= *last {
                    return Err(self.error(line_no, "frequencies must be strictly increasing"));
                }
            }
            self.freqs.push(freq);
            let pairs: Vec<Complex64> = record[1..]
                .chunks(2)
                .map(|pair| self.format.parse(pair[0], pair[1]))
                .collect();
            self.push_point(&pairs);
        }
        Ok(false)
    }

    fn push_point(&mut self, pairs: &[Complex64]) {
        if self.nports == 2 && self.order == TwoPortOrder::Order21_12 {
            // stored row-major: S11 S12 S21 S22
            self.data.extend([pairs[0], pairs[2], pairs[1], pairs[3]]);
        } else {
            self.data.extend_from_slice(pairs);
        }
    }

    fn finish(self, name: &str) -> Result<Network> {
        if !self.values.is_empty() {
            return Err(DeembedError::file_format(
                self.source,
                None,
                format!(
                    "incomplete record: {} trailing value(s), records need {}",
                    self.values.len(),
                    self.record_len()
                ),
            ));
        }
        if self.freqs.is_empty() {
            return Err(DeembedError::file_format(self.source, None, "no network data"));
        }
        if let Some(expected) = self.nfreq_check {
            if expected != self.freqs.len() {
                return Err(DeembedError::file_format(
                    self.source,
                    None,
                    format!(
                        "[Number of Frequencies] is {} but {} were read",
                        expected,
                        self.freqs.len()
                    ),
                ));
            }
        }

        let n = self.nports;
        let npts = self.freqs.len();
        let z0: Vec<f64> = match self.z0.len() {
            0 => vec![self.reference; n],
            1 => vec![self.z0[0]; n],
            len if len == n => self.z0.clone(),
            len => {
                return Err(DeembedError::file_format(
                    self.source,
                    None,
                    format!("{} reference impedance(s) for {} port(s)", len, n),
                ))
            }
        };

        let mut net = Points::from_shape_vec((npts, n, n), self.data).map_err(|e| {
            DeembedError::file_format(self.source, None, format!("inconsistent data: {}", e))
        })?;

        // Version 1 Y and Z data is normalized to the reference impedance
        if !self.version2 {
            match self.param {
                RFParameter::Z => net.mapv_inplace(|x| x * self.reference),
                RFParameter::Y => net.mapv_inplace(|x| x / self.reference),
                RFParameter::S => {}
            }
        }

        let unit = self.unit;
        let freq = Frequency::new(self.freqs.into()).with_unit(unit);
        NetworkBuilder::new()
            .name(name)
            .comments(&self.comments.join("\n"))
            .freq(freq)
            .z0(z0.iter().map(|r| c64(*r, 0.0)).collect())
            .params(net, self.param)
            .build()
    }
}

/// Write a network as a Version 1 touchstone file.
///
/// Values are written with the shortest representation that reads back to
/// the same `f64`. Frequencies use the unit of the network's sweep.
pub fn write_touchstone<P: AsRef<Path>>(net: &Network, path: P, format: RFDataFormat) -> Result<()> {
    let path = path.as_ref();
    let reference = single_reference(net, &path.display().to_string())?;
    // Records go to a sibling temporary file that only replaces `path` once complete
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| DeembedError::io(path, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write_records(net, &mut writer, format, reference)
            .and_then(|_| writer.flush())
            .map_err(|e| DeembedError::io(path, e))?;
    }
    tmp.persist(path).map_err(|e| DeembedError::io(path, e.error))?;
    debug!(path = %path.display(), npts = net.npts(), %format, "wrote touchstone file");
    Ok(())
}

/// Write a network in touchstone form to any writer
pub fn write_touchstone_to<W: Write>(net: &Network, writer: &mut W, format: RFDataFormat) -> Result<()> {
    let reference = single_reference(net, net.name())?;
    write_records(net, writer, format, reference).map_err(|e| DeembedError::Io {
        path: net.name().to_string(),
        source: e,
    })
}

// Version 1 option lines carry one real reference impedance for all ports
fn single_reference(net: &Network, target: &str) -> Result<f64> {
    let z0 = net.z0();
    let first = z0.first().copied().unwrap_or_default();
    if z0.is_empty() || first.im != 0.0 || z0.iter().any(|z| *z != first) {
        return Err(DeembedError::file_format(
            target,
            None,
            "touchstone output needs one real reference impedance for all ports",
        ));
    }
    Ok(first.re)
}

fn write_records<W: Write>(net: &Network, writer: &mut W, format: RFDataFormat, reference: f64) -> io::Result<()> {
    for comment in net.comments().lines() {
        writeln!(writer, "! {}", comment)?;
    }

    let unit = net.freq().unit();
    writeln!(writer, "# {} S {} R {}", unit, format, reference)?;

    let n = net.nports();
    for (idx, freq) in net.freq().freq_scaled(unit).iter().enumerate() {
        let pt = net.s_at(idx);
        write!(writer, "{}", freq)?;
        if n == 2 {
            for (j, k) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                let (a, b) = format.split(pt[[j, k]]);
                write!(writer, "  {:e} {:e}", a, b)?;
            }
            writeln!(writer)?;
        } else {
            for j in 0..n {
                if j > 0 {
                    write!(writer, "{:width$}", "", width = freq.to_string().len())?;
                }
                for k in 0..n {
                    let (a, b) = format.split(pt[[j, k]]);
                    write!(writer, "  {:e} {:e}", a, b)?;
                }
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::{comp_line, comp_point_c64};
    use float_cmp::F64Margin;
    use ndarray::prelude::*;
    use std::path::PathBuf;

    const MARGIN: F64Margin = F64Margin {
        epsilon: 1e-12,
        ulps: 4,
    };

    #[test]
    fn nports_from_extension() {
        assert_eq!(nports_from_path(&PathBuf::from("a/b.s1p")).unwrap(), 1);
        assert_eq!(nports_from_path(&PathBuf::from("b.S2P")).unwrap(), 2);
        assert_eq!(nports_from_path(&PathBuf::from("b.s12p")).unwrap(), 12);
        assert_eq!(nports_from_path(&PathBuf::from("b.ts")).unwrap(), 0);
        assert!(nports_from_path(&PathBuf::from("b.txt")).is_err());
        assert!(nports_from_path(&PathBuf::from("b")).is_err());
        assert!(nports_from_path(&PathBuf::from("b.s0p")).is_err());
    }

    #[test]
    fn parse_one_port_ri() {
        let content = "! one port\n# MHz S RI R 75\n100 0.5 0.0\n200 0.0 0.5\n";
        let net = parse_touchstone(content, 1, "load").unwrap();
        assert_eq!(net.nports(), 1);
        assert_eq!(net.npts(), 2);
        assert_eq!(net.freq().freq_at(1), 200e6);
        assert_eq!(net.freq().unit(), Unit::Mega);
        assert_eq!(net.z0()[0], c64(75.0, 0.0));
        assert_eq!(net.comments(), "one port");
        assert_eq!(net.s_at(1)[[0, 0]], c64(0.0, 0.5));
    }

    #[test]
    fn parse_defaults_to_ghz_ma_50() {
        let content = "1.0 0.5 90\n";
        let net = parse_touchstone(content, 1, "load").unwrap();
        assert_eq!(net.freq().freq_at(0), 1e9);
        assert_eq!(net.z0()[0], c64(50.0, 0.0));
        comp_point_c64(
            &array![[c64(0.0, 0.5)]].view(),
            &net.s_at(0),
            MARGIN,
            "default MA",
        );
    }

    #[test]
    fn parse_two_port_order_and_wrapping() {
        let content = "# GHz S RI R 50\n\
                       1.0 0.11 0.0 0.21 0.0\n\
                       0.12 0.0 0.22 0.0 ! wrapped record\n";
        let net = parse_touchstone(content, 2, "dut").unwrap();
        let exemplar = array![[c64(0.11, 0.0), c64(0.12, 0.0)], [c64(0.21, 0.0), c64(0.22, 0.0)]];
        assert_eq!(exemplar, net.s_at(0));
    }

    #[test]
    fn parse_two_port_db() {
        let content = "# Hz S DB R 50\n1e9 -20 0 -6.020599913279624 180 0 0 -20 0\n";
        let net = parse_touchstone(content, 2, "dut").unwrap();
        let exemplar = array![[c64(0.1, 0.0), c64(1.0, 0.0)], [c64(-0.5, 0.0), c64(0.1, 0.0)]];
        comp_point_c64(&exemplar.view(), &net.s_at(0), F64Margin { epsilon: 1e-9, ulps: 4 }, "DB");
    }

    #[test]
    fn parse_skips_v1_noise_block() {
        let content = "# GHz S RI R 50\n\
                       1.0 0.1 0 0.9 0 0.9 0 0.1 0\n\
                       2.0 0.2 0 0.8 0 0.8 0 0.2 0\n\
                       ! noise parameters\n\
                       1.0 1.5 0.3 45 0.2\n\
                       2.0 1.7 0.3 50 0.2\n";
        let net = parse_touchstone(content, 2, "amp").unwrap();
        assert_eq!(net.npts(), 2);
    }

    #[test]
    fn parse_z_parameters_v1_normalized() {
        // z = 3 normalized to 50 ohm is 150 ohm, reflection 0.5
        let content = "# GHz Z RI R 50\n1.0 3.0 0.0\n";
        let net = parse_touchstone(content, 1, "load").unwrap();
        comp_point_c64(&array![[c64(0.5, 0.0)]].view(), &net.s_at(0), MARGIN, "Z v1");
    }

    #[test]
    fn parse_version2_keywords() {
        let content = "[Version] 2.0\n\
                       # GHz S RI R 50\n\
                       [Number of Ports] 2\n\
                       [Two-Port Data Order] 12_21\n\
                       [Number of Frequencies] 1\n\
                       [Reference] 50\n\
                       75\n\
                       [Network Data]\n\
                       1.0 0.11 0 0.12 0 0.21 0 0.22 0\n\
                       [End]\n";
        let net = parse_touchstone(content, 0, "dut").unwrap();
        assert_eq!(net.z0(), &array![c64(50.0, 0.0), c64(75.0, 0.0)]);
        let exemplar = array![[c64(0.11, 0.0), c64(0.12, 0.0)], [c64(0.21, 0.0), c64(0.22, 0.0)]];
        assert_eq!(exemplar, net.s_at(0));
    }

    #[test]
    fn parse_version2_single_reference() {
        let content = "[Version] 2.0\n\
                       # GHz S RI R 50\n\
                       [Number of Ports] 2\n\
                       [Reference] 75\n\
                       [Network Data]\n\
                       1.0 0.11 0 0.21 0 0.12 0 0.22 0\n\
                       [End]\n";
        let net = parse_touchstone(content, 0, "dut").unwrap();
        assert_eq!(net.npts(), 1);
        assert_eq!(net.z0(), &array![c64(75.0, 0.0), c64(75.0, 0.0)]);
    }

    #[test]
    fn parse_y_parameters_v1_normalized() {
        // y = 0.5 normalized to 50 ohm is 0.01 S, i.e. 100 ohm, reflection 1/3
        let content = "# GHz Y RI R 50\n1.0 0.5 0.0\n";
        let net = parse_touchstone(content, 1, "load").unwrap();
        comp_point_c64(&array![[c64(1.0 / 3.0, 0.0)]].view(), &net.s_at(0), MARGIN, "Y v1");
    }

    #[test]
    fn parse_version2_noise_data_ends_network() {
        let content = "[Version] 2.0\n\
                       # GHz S RI R 50\n\
                       [Number of Ports] 2\n\
                       [Two-Port Data Order] 12_21\n\
                       [Network Data]\n\
                       1.0 0.1 0 0.9 0 0.9 0 0.1 0\n\
                       2.0 0.2 0 0.8 0 0.8 0 0.2 0\n\
                       [Noise Data]\n\
                       1.0 1.5 0.3 45 0.2\n\
                       2.0 1.7 0.3 50 0.2\n\
                       [End]\n";
        let net = parse_touchstone(content, 0, "amp").unwrap();
        assert_eq!(net.npts(), 2);
        assert_eq!(net.s_at(1)[[0, 1]], c64(0.8, 0.0));
    }

    #[test]
    fn parse_rejects_unsupported_matrix_format() {
        let content = "[Version] 2.0\n\
                       # GHz S RI R 50\n\
                       [Number of Ports] 2\n\
                       [Matrix Format] Lower\n\
                       [Network Data]\n\
                       1.0 0.1 0 0.9 0 0.1 0\n";
        let err = parse_touchstone(content, 0, "dut").unwrap_err();
        assert!(matches!(err, DeembedError::FileFormat { line: Some(4), .. }));
    }

    #[test]
    fn parse_rejects_non_positive_reference() {
        for option in ["# GHz S RI R 0", "# GHz S RI R -50", "# GHz S RI R inf"] {
            let content = format!("{}\n1.0 0.1 0\n", option);
            let err = parse_touchstone(&content, 1, "x").unwrap_err();
            assert!(
                matches!(err, DeembedError::FileFormat { line: Some(1), .. }),
                "{}: {:?}",
                option,
                err
            );
        }

        let content = "[Version] 2.0\n# GHz S RI R 50\n[Number of Ports] 1\n[Reference] 0\n[Network Data]\n1.0 0.1 0\n";
        let err = parse_touchstone(content, 0, "x").unwrap_err();
        assert!(matches!(err, DeembedError::FileFormat { line: Some(4), .. }));
    }

    #[test]
    fn parse_errors() {
        let bad_number = parse_touchstone("# GHz S RI R 50\n1.0 abc 0\n", 1, "x").unwrap_err();
        assert!(matches!(bad_number, DeembedError::FileFormat { line: Some(2), .. }));

        let incomplete = parse_touchstone("# GHz S RI R 50\n1.0 0.1\n", 1, "x").unwrap_err();
        assert!(matches!(incomplete, DeembedError::FileFormat { line: None, .. }));

        let empty = parse_touchstone("! nothing\n# GHz S RI R 50\n", 1, "x").unwrap_err();
        assert!(matches!(empty, DeembedError::FileFormat { .. }));

        let hybrid = parse_touchstone("# GHz H RI R 50\n1.0 0.1 0\n", 1, "x").unwrap_err();
        assert!(matches!(hybrid, DeembedError::FileFormat { line: Some(1), .. }));

        let decreasing = parse_touchstone("# GHz S RI R 50\n2.0 0.1 0\n1.0 0.1 0\n", 1, "x").unwrap_err();
        assert!(matches!(decreasing, DeembedError::FileFormat { line: Some(3), .. }));

        let count = parse_touchstone(
            "[Version] 2.0\n# GHz S RI R 50\n[Number of Ports] 1\n[Number of Frequencies] 2\n[Network Data]\n1.0 0.1 0\n",
            0,
            "x",
        )
        .unwrap_err();
        assert!(matches!(count, DeembedError::FileFormat { .. }));
    }

    #[test]
    fn write_two_port_ri() {
        let net = NetworkBuilder::new()
            .name("dut")
            .comments("intrinsic")
            .freq(Frequency::from_vec(vec![1.5], Unit::Giga))
            .z0_scalar(c64(50.0, 0.0))
            .s(array![[[c64(0.5, -0.25), c64(0.0, 0.0)], [c64(0.125, 0.0), c64(0.5, 0.0)]]])
            .build()
            .unwrap();
        let mut buf = Vec::new();
        write_touchstone_to(&net, &mut buf, RFDataFormat::RI).unwrap();
        let exemplar = "! intrinsic\n\
                        # GHz S RI R 50\n\
                        1.5  5e-1 -2.5e-1  1.25e-1 0e0  0e0 0e0  5e-1 0e0\n";
        comp_line(exemplar, &String::from_utf8(buf).unwrap(), "write(RI)");
    }

    #[test]
    fn write_rejects_mixed_reference() {
        let net = NetworkBuilder::new()
            .freq(Frequency::from_vec(vec![1.0], Unit::Giga))
            .z0(array![c64(50.0, 0.0), c64(75.0, 0.0)])
            .s(Points::zeros((1, 2, 2)))
            .build()
            .unwrap();
        let mut buf = Vec::new();
        assert!(matches!(
            write_touchstone_to(&net, &mut buf, RFDataFormat::RI),
            Err(DeembedError::FileFormat { .. })
        ));
    }

    #[test]
    fn write_touchstone_replaces_whole_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("out.s1p");
        fs::write(&target, "stale contents that are much longer than the new file\n").unwrap();

        let net = NetworkBuilder::new()
            .freq(Frequency::from_vec(vec![1.0], Unit::Giga))
            .s(array![[[c64(0.5, 0.0)]]])
            .build()
            .unwrap();
        write_touchstone(&net, &target, RFDataFormat::RI).unwrap();
        let back = read_touchstone(&target).unwrap();
        assert_eq!(back.s(), net.s());

        // A destination that cannot be replaced leaves no partial or temporary file
        let blocked = dir.path().join("blocked.s1p");
        fs::create_dir(&blocked).unwrap();
        assert!(matches!(
            write_touchstone(&net, &blocked, RFDataFormat::RI),
            Err(DeembedError::Io { .. })
        ));
        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["blocked.s1p", "out.s1p"]);
    }

    #[test]
    fn write_then_parse_is_lossless() {
        let s = array![
            [[c64(0.1234567890123, -0.3), c64(1e-7, 2e-9)], [c64(0.7, 0.01), c64(-0.2, 0.4)]],
            [[c64(0.2, -0.1), c64(3e-7, 1e-9)], [c64(0.6, 0.02), c64(-0.1, 0.45)]]
        ];
        let net = NetworkBuilder::new()
            .freq(Frequency::from_vec(vec![1.0, 2.0], Unit::Giga))
            .z0_scalar(c64(50.0, 0.0))
            .s(s.clone())
            .build()
            .unwrap();
        let mut buf = Vec::new();
        write_touchstone_to(&net, &mut buf, RFDataFormat::RI).unwrap();
        let back = parse_touchstone(&String::from_utf8(buf).unwrap(), 2, "back").unwrap();
        assert_eq!(&s, back.s());
        assert_eq!(net.freq(), back.freq());
    }
}
