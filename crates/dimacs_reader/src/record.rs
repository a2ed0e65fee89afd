use std::str::FromStr;

use anyhow::{bail, Context};

/// A single meaningful line of a DIMACS challenge file.
///
/// Only coordinate (`v`) and arc (`a`) lines carry data. Comment (`c`) and
/// problem (`p`) lines as well as empty lines are skipped by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// `v <id> <x> <y>` where x is the longitude and y the latitude in
    /// millionths of a degree
    Vertex { id: u32, lon: i64, lat: i64 },
    /// `a <source> <target> <weight>`
    Arc { source: u32, target: u32, weight: u64 },
}

impl FromStr for Record {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.split_whitespace();

        let tag = fields.next().context("Empty record")?;
        let mut next_field = |name: &str| {
            fields
                .next()
                .with_context(|| format!("Missing field `{}` in record `{}`", name, line))
        };

        match tag {
            "v" => {
                let id = next_field("id")?.parse()?;
                let lon = next_field("x")?.parse()?;
                let lat = next_field("y")?.parse()?;
                Ok(Record::Vertex { id, lon, lat })
            }
            "a" => {
                let source = next_field("source")?.parse()?;
                let target = next_field("target")?.parse()?;
                let weight = next_field("weight")?.parse()?;
                Ok(Record::Arc {
                    source,
                    target,
                    weight,
                })
            }
            _ => bail!("Unknown record type `{}`", tag),
        }
    }
}

/// Returns true if the line holds data the reader is interested in
pub(crate) fn is_data_line(line: &str, tag: char) -> bool {
    line.trim_start().starts_with(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vertex() {
        let record: Record = "v 1 -73530767 41085396".parse().unwrap();
        assert_eq!(
            record,
            Record::Vertex {
                id: 1,
                lon: -73530767,
                lat: 41085396
            }
        );
    }

    #[test]
    fn parse_arc() {
        let record: Record = "a 1 2 803".parse().unwrap();
        assert_eq!(
            record,
            Record::Arc {
                source: 1,
                target: 2,
                weight: 803
            }
        );
    }

    #[test]
    fn reject_broken_lines() {
        assert!("a 1 2".parse::<Record>().is_err());
        assert!("v x 1 2".parse::<Record>().is_err());
        assert!("q 1 2 3".parse::<Record>().is_err());
        assert!("a 1 2 -5".parse::<Record>().is_err());
    }
}
