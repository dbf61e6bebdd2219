use crate::description::{
    record_tag, required_dimensions, required_number, DescriptionError, Tokens,
};

/// Smallest roughness grid that leaves room for central differences.
pub(super) const MIN_ROUGHNESS_DIM: i64 = 3;

/// One header line of a paper description.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum PaperRecord {
    /// `p size` grid pitch in µm
    PixelSize(f64),
    /// `c level` contact depth below the highest peak, µm
    ContactLevel(f64),
    /// `m range` height of a full-scale (255) cell, µm
    MaxRange(f64),
    /// `S scale beta` followed by curve lines
    Specular { scale: f64, beta: f64 },
    /// `D scale` followed by curve lines
    Diffuse { scale: f64 },
    /// `A scale` followed by curve lines
    Ambient { scale: f64 },
    /// `r cols rows` followed by `rows` lines of integer heights
    Roughness { cols: usize, rows: usize },
    /// `a cols rows` followed by `rows` lines of half-angle offsets
    BetaGrid { cols: usize, rows: usize },
    /// Comments, blank lines and unknown tags
    Ignored,
}

impl PaperRecord {
    pub(super) fn classify(line_no: usize, text: &str) -> Result<Self, DescriptionError> {
        let mut tokens = Tokens::new(text);
        let record = match record_tag(text) {
            Some('p') => PaperRecord::PixelSize(required_number(&mut tokens, line_no, "pixel size")?),
            Some('c') => {
                PaperRecord::ContactLevel(required_number(&mut tokens, line_no, "contact level")?)
            }
            Some('m') => PaperRecord::MaxRange(required_number(&mut tokens, line_no, "max range")?),
            Some('S') => PaperRecord::Specular {
                scale: required_number(&mut tokens, line_no, "specular scale")?,
                beta: required_number(&mut tokens, line_no, "specular beta")?,
            },
            Some('D') => PaperRecord::Diffuse {
                scale: required_number(&mut tokens, line_no, "diffuse scale")?,
            },
            Some('A') => PaperRecord::Ambient {
                scale: required_number(&mut tokens, line_no, "ambient scale")?,
            },
            Some('r') => {
                let (cols, rows) =
                    required_dimensions(&mut tokens, line_no, "roughness", MIN_ROUGHNESS_DIM)?;
                PaperRecord::Roughness { cols, rows }
            }
            Some('a') => {
                let (cols, rows) = required_dimensions(&mut tokens, line_no, "beta", 1)?;
                PaperRecord::BetaGrid { cols, rows }
            }
            _ => PaperRecord::Ignored,
        };
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_scalar_records() {
        assert_eq!(PaperRecord::classify(1, "p 25").unwrap(), PaperRecord::PixelSize(25.0));
        assert_eq!(
            PaperRecord::classify(1, "c 4.5").unwrap(),
            PaperRecord::ContactLevel(4.5)
        );
        assert_eq!(PaperRecord::classify(1, "m 12").unwrap(), PaperRecord::MaxRange(12.0));
    }

    #[test]
    fn test_classify_block_headers() {
        assert_eq!(
            PaperRecord::classify(1, "S 0.8 0.25").unwrap(),
            PaperRecord::Specular {
                scale: 0.8,
                beta: 0.25
            }
        );
        assert_eq!(
            PaperRecord::classify(1, "r 4 3").unwrap(),
            PaperRecord::Roughness { cols: 4, rows: 3 }
        );
        assert_eq!(
            PaperRecord::classify(1, "a 2 2").unwrap(),
            PaperRecord::BetaGrid { cols: 2, rows: 2 }
        );
    }

    #[test]
    fn test_unknown_and_comment_lines_are_ignored() {
        assert_eq!(PaperRecord::classify(1, "# p 30").unwrap(), PaperRecord::Ignored);
        assert_eq!(PaperRecord::classify(1, "z 1 2").unwrap(), PaperRecord::Ignored);
        assert_eq!(PaperRecord::classify(1, "").unwrap(), PaperRecord::Ignored);
    }

    #[test]
    fn test_missing_payload_is_error() {
        let err = PaperRecord::classify(9, "S 0.8").unwrap_err();
        assert_eq!(err.line(), Some(9));
        assert_eq!(err.to_string(), "line 9: missing specular beta");
    }

    #[test]
    fn test_roughness_grid_too_small() {
        assert!(PaperRecord::classify(1, "r 2 8").is_err());
    }
}
