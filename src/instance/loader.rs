use super::distance::DistanceModel;
use super::matrix::{self, EdgeMatrix};
use super::types::{parse_or_unknown, EdgeWeightFormat, EdgeWeightType, Node};
use super::Instance;
use crate::error::{TfResult, TourForgeError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Where the line scanner currently is in a TSPLIB file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    NodeCoords,
    EdgeWeights { expected: usize },
    FixedEdges,
    Depots,
    Demands { remaining: usize },
    Skip { remaining: usize },
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> TfResult<Instance> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut instance = parse(BufReader::new(file))?;

    if instance.name.is_empty() {
        if let Some(stem) = path.file_stem() {
            instance.name = stem.to_string_lossy().to_string();
        }
    }

    info!(
        "📂 Loaded '{}': {} nodes, TYPE {}, EDGE_WEIGHT_TYPE {}",
        instance.name, instance.dimension, instance.problem_type, instance.edge_weight_type
    );
    Ok(instance)
}

/// Parses TSPLIB text from any buffered source.
pub fn parse<R: BufRead>(reader: R) -> TfResult<Instance> {
    let mut parser = Parser::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if !parser.feed(idx + 1, line.trim_end())? {
            break;
        }
    }
    parser.finish()
}

struct Parser {
    instance: Instance,
    section: Section,
    weights: Vec<i64>,
    matrix: Option<EdgeMatrix>,
    line_no: usize,
}

impl Parser {
    fn new() -> Self {
        Self {
            instance: Instance::empty(),
            section: Section::Header,
            weights: Vec::new(),
            matrix: None,
            line_no: 0,
        }
    }

    /// Consumes one right-trimmed line. Returns `false` once `EOF` is reached.
    fn feed(&mut self, line_no: usize, line: &str) -> TfResult<bool> {
        self.line_no = line_no;
        if line.is_empty() {
            return Ok(true);
        }
        if line.trim().eq_ignore_ascii_case("EOF") {
            return Ok(false);
        }

        self.section = match self.section {
            Section::Header => self.header_line(line)?,
            Section::NodeCoords => self.node_line(line)?,
            Section::EdgeWeights { expected } => self.weight_line(line, expected)?,
            Section::FixedEdges => self.fixed_edge_line(line)?,
            Section::Depots => self.depot_line(line)?,
            Section::Demands { remaining } => self.demand_line(line, remaining)?,
            Section::Skip { remaining } => {
                if remaining <= 1 {
                    Section::Header
                } else {
                    Section::Skip {
                        remaining: remaining - 1,
                    }
                }
            }
        };
        Ok(true)
    }

    fn header_line(&mut self, line: &str) -> TfResult<Section> {
        let (key, value) = line.split_once(':').unwrap_or((line, ""));
        let key: String = key
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        let compact: String = value
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();

        let line_no = self.line_no;
        let inst = &mut self.instance;
        match key.as_str() {
            "NAME" => inst.name = value.trim().to_string(),
            "COMMENT" => {
                if !inst.comment.is_empty() {
                    inst.comment.push(' ');
                }
                inst.comment.push_str(value.trim());
            }
            "TYPE" => inst.problem_type = parse_or_unknown(&compact),
            "DIMENSION" => {
                inst.dimension = compact.parse().map_err(|_| {
                    TourForgeError::parse(line_no, format!("invalid DIMENSION '{}'", value.trim()))
                })?;
            }
            "CAPACITY" => {
                let capacity = compact.parse().map_err(|_| {
                    TourForgeError::parse(line_no, format!("invalid CAPACITY '{}'", value.trim()))
                })?;
                inst.capacity = Some(capacity);
            }
            "EDGE_WEIGHT_TYPE" => inst.edge_weight_type = parse_or_unknown(&compact),
            "EDGE_WEIGHT_FORMAT" => inst.edge_weight_format = parse_or_unknown(&compact),
            "NODE_COORD_SECTION" => {
                let n = self.require_dimension(&key)?;
                if self.instance.edge_weight_type == EdgeWeightType::Explicit {
                    debug!("Skipping NODE_COORD_SECTION of an EXPLICIT instance");
                    return Ok(Section::Skip { remaining: n });
                }
                return Ok(Section::NodeCoords);
            }
            "EDGE_WEIGHT_SECTION" => {
                let n = self.require_dimension(&key)?;
                let format = self.instance.edge_weight_format;
                if matches!(format, EdgeWeightFormat::Function | EdgeWeightFormat::Unknown) {
                    return Err(TourForgeError::parse(
                        line_no,
                        format!("EDGE_WEIGHT_SECTION needs a matrix EDGE_WEIGHT_FORMAT, got {}", format),
                    ));
                }
                let expected = matrix::required_len(format, n).map_err(|_| {
                    TourForgeError::parse(line_no, format!("DIMENSION {} is too large for {}", n, format))
                })?;
                self.weights.clear();
                return Ok(if expected == 0 {
                    self.finish_weights()?
                } else {
                    Section::EdgeWeights { expected }
                });
            }
            "FIXED_EDGES_SECTION" => return Ok(Section::FixedEdges),
            "DEPOT_SECTION" => return Ok(Section::Depots),
            "DEMAND_SECTION" => {
                let n = self.require_dimension(&key)?;
                return Ok(Section::Demands { remaining: n });
            }
            "DISPLAY_DATA_SECTION" => {
                let n = self.require_dimension(&key)?;
                return Ok(Section::Skip { remaining: n });
            }
            other => debug!("Ignoring header keyword '{}' (line {})", other, line_no),
        }
        Ok(Section::Header)
    }

    fn require_dimension(&self, section: &str) -> TfResult<usize> {
        match self.instance.dimension {
            0 => Err(TourForgeError::parse(
                self.line_no,
                format!("{} appears before a positive DIMENSION", section),
            )),
            n => Ok(n),
        }
    }

    fn node_line(&mut self, line: &str) -> TfResult<Section> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(TourForgeError::parse(
                self.line_no,
                format!("expected 'id x y', got '{}'", line.trim()),
            ));
        }

        let id = fields[0].parse::<usize>().map_err(|_| self.bad_number(fields[0]))?;
        let x = self.float(fields[1])?;
        let y = self.float(fields[2])?;
        let z = match fields.get(3) {
            Some(token) => self.float(token)?,
            None => 0.0,
        };
        self.instance.nodes.push(Node { id, x, y, z });

        if self.instance.nodes.len() >= self.instance.dimension {
            Ok(Section::Header)
        } else {
            Ok(Section::NodeCoords)
        }
    }

    fn weight_line(&mut self, line: &str, expected: usize) -> TfResult<Section> {
        for token in line.split_whitespace() {
            if self.weights.len() >= expected {
                break;
            }
            let w = token.parse::<i64>().map_err(|_| self.bad_number(token))?;
            self.weights.push(w);
        }

        if self.weights.len() >= expected {
            self.finish_weights()
        } else {
            Ok(Section::EdgeWeights { expected })
        }
    }

    fn finish_weights(&mut self) -> TfResult<Section> {
        let format = self.instance.edge_weight_format;
        let full = matrix::expand(format, self.instance.dimension, &self.weights)?;
        debug!(
            "Expanded {} weights ({}) into a {}x{} matrix",
            self.weights.len(),
            format,
            full.dimension(),
            full.dimension()
        );
        self.matrix = Some(full);
        self.weights = Vec::new();
        Ok(Section::Header)
    }

    fn fixed_edge_line(&mut self, line: &str) -> TfResult<Section> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.first() == Some(&"-1") {
            return Ok(Section::Header);
        }
        if fields.len() < 2 {
            return Err(TourForgeError::parse(
                self.line_no,
                format!("expected a node pair, got '{}'", line.trim()),
            ));
        }
        let a = fields[0].parse().map_err(|_| self.bad_number(fields[0]))?;
        let b = fields[1].parse().map_err(|_| self.bad_number(fields[1]))?;
        self.instance.fixed_edges.push((a, b));
        Ok(Section::FixedEdges)
    }

    fn depot_line(&mut self, line: &str) -> TfResult<Section> {
        for token in line.split_whitespace() {
            if token == "-1" {
                return Ok(Section::Header);
            }
            let id = token.parse().map_err(|_| self.bad_number(token))?;
            self.instance.depots.push(id);
        }
        Ok(Section::Depots)
    }

    fn demand_line(&mut self, line: &str, remaining: usize) -> TfResult<Section> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(TourForgeError::parse(
                self.line_no,
                format!("expected 'id demand', got '{}'", line.trim()),
            ));
        }
        let id = fields[0].parse().map_err(|_| self.bad_number(fields[0]))?;
        let demand = fields[1].parse().map_err(|_| self.bad_number(fields[1]))?;
        self.instance.demands.push((id, demand));

        if remaining <= 1 {
            Ok(Section::Header)
        } else {
            Ok(Section::Demands {
                remaining: remaining - 1,
            })
        }
    }

    fn float(&self, token: &str) -> TfResult<f64> {
        token.parse::<f64>().map_err(|_| self.bad_number(token))
    }

    fn bad_number(&self, token: &str) -> TourForgeError {
        TourForgeError::parse(self.line_no, format!("invalid number '{}'", token))
    }

    fn finish(self) -> TfResult<Instance> {
        let Parser {
            mut instance,
            section,
            weights,
            matrix,
            line_no,
        } = self;

        match section {
            Section::NodeCoords => {
                return Err(TourForgeError::parse(
                    line_no,
                    format!(
                        "NODE_COORD_SECTION ended after {} of {} nodes",
                        instance.nodes.len(),
                        instance.dimension
                    ),
                ))
            }
            Section::EdgeWeights { expected } => {
                return Err(TourForgeError::parse(
                    line_no,
                    format!(
                        "EDGE_WEIGHT_SECTION ended after {} of {} weights",
                        weights.len(),
                        expected
                    ),
                ))
            }
            _ => {}
        }

        if instance.dimension == 0 {
            return Err(TourForgeError::parse(line_no, "missing or zero DIMENSION"));
        }

        if instance.edge_weight_type == EdgeWeightType::Explicit {
            let matrix = matrix.ok_or_else(|| {
                TourForgeError::parse(line_no, "EXPLICIT instance has no EDGE_WEIGHT_SECTION")
            })?;
            if instance.nodes.is_empty() {
                instance.nodes = (1..=instance.dimension).map(Node::origin).collect();
            }
            instance.model = DistanceModel::Explicit(matrix);
        } else {
            instance.model = DistanceModel::Formula(instance.edge_weight_type);
        }

        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_eof_is_matched_as_a_keyword() {
        let src = "NAME: GEOFF\nDIMENSION: 2\nEDGE_WEIGHT_TYPE: EUC_2D\nNODE_COORD_SECTION\n1 0 0\n2 3 4\nEOF\n";
        let inst = parse(Cursor::new(src)).unwrap();
        assert_eq!(inst.name, "GEOFF");
        assert_eq!(inst.nodes.len(), 2);
    }

    #[test]
    fn test_section_before_dimension_fails() {
        let src = "EDGE_WEIGHT_TYPE: EUC_2D\nNODE_COORD_SECTION\n1 0 0\n";
        let err = parse(Cursor::new(src)).unwrap_err();
        assert!(matches!(err, TourForgeError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_bad_dimension_reports_line() {
        let src = "NAME: x\nDIMENSION: many\n";
        let err = parse(Cursor::new(src)).unwrap_err();
        assert!(matches!(err, TourForgeError::Parse { line: 2, .. }));
    }
}
