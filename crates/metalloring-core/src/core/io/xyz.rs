use crate::core::io::traits::MolecularFile;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

pub const DEFAULT_COMMENT: &str = "Generated by metalloring";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XyzMetadata {
    /// The free-form second line of the file.
    pub comment: String,
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count (value: '{value}')")]
    InvalidCount { value: String },
    #[error("Invalid {axis} coordinate (value: '{value}')")]
    InvalidFloat { axis: char, value: String },
    #[error("Atom line needs a symbol and three coordinates, found {found} field(s)")]
    TooFewFields { found: usize },
}

pub struct XyzFile;

impl MolecularFile for XyzFile {
    type Metadata = XyzMetadata;
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut lines = reader.lines();

        let count_line = lines
            .next()
            .ok_or_else(|| XyzError::MissingRecord("atom count line".into()))??;
        let count_str = count_line.trim();
        let expected: usize = count_str.parse().map_err(|_| XyzError::Parse {
            line: 1,
            kind: XyzParseErrorKind::InvalidCount {
                value: count_str.into(),
            },
        })?;

        let comment = match lines.next() {
            Some(line) => line?,
            None if expected == 0 => String::new(),
            None => return Err(XyzError::MissingRecord("comment line".into())),
        };
        let metadata = XyzMetadata {
            comment: comment.trim_end().to_string(),
        };

        let structure = lines
            .take(expected)
            .enumerate()
            .map(|(offset, line_res)| -> Result<(String, Point3<f64>), XyzError> {
                let line = line_res?;
                let (symbol, position) = parse_atom_line(&line, offset + 3)?;
                Ok((symbol.to_string(), position))
            })
            .collect::<Result<Structure, XyzError>>()?;

        if structure.len() < expected {
            return Err(XyzError::MissingRecord(format!(
                "{} atom line(s) declared but only {} found",
                expected,
                structure.len()
            )));
        }

        Ok((structure, metadata))
    }

    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "{}", structure.len())?;
        writeln!(writer, "{}", metadata.comment)?;
        for atom in structure.atoms() {
            writeln!(
                writer,
                "{} {:.6} {:.6} {:.6}",
                atom.symbol, atom.position.x, atom.position.y, atom.position.z
            )?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_structure_to(
        structure: &Structure,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let default_metadata = XyzMetadata {
            comment: DEFAULT_COMMENT.to_string(),
        };
        Self::write_to(structure, &default_metadata, writer)
    }
}

fn parse_atom_line(line: &str, line_num: usize) -> Result<(&str, Point3<f64>), XyzError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::TooFewFields {
                found: fields.len(),
            },
        });
    }

    let coordinate = |axis: char, value: &str| -> Result<f64, XyzError> {
        value.parse().map_err(|_| XyzError::Parse {
            line: line_num,
            kind: XyzParseErrorKind::InvalidFloat {
                axis,
                value: value.into(),
            },
        })
    };

    let x = coordinate('x', fields[1])?;
    let y = coordinate('y', fields[2])?;
    let z = coordinate('z', fields[3])?;
    Ok((fields[0], Point3::new(x, y, z)))
}
