use crate::description::{
    record_tag, required_dimensions, required_number, DescriptionError, DescriptionErrorKind,
    Tokens,
};

/// Declared shape of the ink footprint, before its block is read.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum FootprintSpec {
    /// `DOT scale`: a single cell
    Dot { scale: f64 },
    /// `BOX width height scale`: a filled rectangle, size in mm
    Box {
        width_mm: f64,
        height_mm: f64,
        scale: f64,
    },
    /// `MATRIX cols rows scale` followed by `rows` bitmap lines
    Matrix {
        cols: usize,
        rows: usize,
        scale: f64,
    },
}

/// One header line of an ink description.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum InkRecord {
    Absorption(f64),
    Deposition(f64),
    Splitting(f64),
    PixelSize(f64),
    /// `l x y` footprint origin in mm
    Location { x_mm: f64, y_mm: f64 },
    Footprint(FootprintSpec),
    Specular { scale: f64, beta: f64 },
    Diffuse { scale: f64 },
    Ambient { scale: f64 },
    /// `c cols rows` followed by `rows` lines of kernel weights
    Kernel { cols: usize, rows: usize },
    Ignored,
}

impl InkRecord {
    pub(super) fn classify(line_no: usize, text: &str) -> Result<Self, DescriptionError> {
        let mut tokens = Tokens::new(text);
        let record = match record_tag(text) {
            Some('a') => InkRecord::Absorption(required_number(&mut tokens, line_no, "absorption")?),
            Some('d') => InkRecord::Deposition(required_number(&mut tokens, line_no, "deposition")?),
            Some('s') => InkRecord::Splitting(required_number(&mut tokens, line_no, "splitting")?),
            Some('p') => InkRecord::PixelSize(required_number(&mut tokens, line_no, "pixel size")?),
            Some('l') => InkRecord::Location {
                x_mm: required_number(&mut tokens, line_no, "location x")?,
                y_mm: required_number(&mut tokens, line_no, "location y")?,
            },
            Some('i') => InkRecord::Footprint(footprint(&mut tokens, line_no)?),
            Some('S') => InkRecord::Specular {
                scale: required_number(&mut tokens, line_no, "specular scale")?,
                beta: required_number(&mut tokens, line_no, "specular beta")?,
            },
            Some('D') => InkRecord::Diffuse {
                scale: required_number(&mut tokens, line_no, "diffuse scale")?,
            },
            Some('A') => InkRecord::Ambient {
                scale: required_number(&mut tokens, line_no, "ambient scale")?,
            },
            Some('c') => {
                let (cols, rows) = required_dimensions(&mut tokens, line_no, "kernel", 1)?;
                InkRecord::Kernel { cols, rows }
            }
            _ => InkRecord::Ignored,
        };
        Ok(record)
    }
}

/// The footprint line is `<tag word> <KEYWORD> <numbers...>`.
fn footprint(tokens: &mut Tokens<'_>, line_no: usize) -> Result<FootprintSpec, DescriptionError> {
    let _tag = tokens.next_word();
    let keyword = tokens
        .next_word()
        .ok_or_else(|| DescriptionError::missing_value(line_no, "footprint type"))?;
    let spec = match keyword {
        "DOT" => FootprintSpec::Dot {
            scale: required_number(tokens, line_no, "footprint scale")?,
        },
        "BOX" => FootprintSpec::Box {
            width_mm: required_number(tokens, line_no, "box width")?,
            height_mm: required_number(tokens, line_no, "box height")?,
            scale: required_number(tokens, line_no, "footprint scale")?,
        },
        "MATRIX" => {
            let (cols, rows) = required_dimensions(tokens, line_no, "footprint", 1)?;
            FootprintSpec::Matrix {
                cols,
                rows,
                scale: required_number(tokens, line_no, "footprint scale")?,
            }
        }
        other => {
            return Err(DescriptionError::at(
                line_no,
                DescriptionErrorKind::UnknownFootprint {
                    keyword: other.to_string(),
                },
            ))
        }
    };
    Ok(spec)
}
