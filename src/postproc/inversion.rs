use crate::StrError;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// Holds the parameter blocks of a SHEMAT-Suite parameter file, keyed by the header line
pub type ParamBlocks = BTreeMap<String, Vec<Vec<f64>>>;

/// Holds a table of simulated and observed values at the data nodes of a model
///
/// Typical columns are `i j k unit calc obs`.
#[derive(Clone, Debug, PartialEq)]
pub struct InvData {
    /// Column names
    pub columns: Vec<String>,

    /// Rows of values
    pub rows: Vec<Vec<f64>>,
}

impl InvData {
    /// Parses the content of a SHEMAT-Suite data file
    ///
    /// The first two lines are skipped. The third line is the header whose first
    /// token is a comment marker. The remaining lines are whitespace-separated values.
    pub fn parse(content: &str) -> Result<Self, StrError> {
        let mut lines = content.lines().skip(2);
        let header = lines.next().ok_or("data file must have a header line after two leading lines")?;
        let columns: Vec<String> = header.split_whitespace().skip(1).map(|s| s.to_string()).collect();
        if columns.is_empty() {
            return Err("the header of the data file has no column names");
        }
        let mut rows = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|s| s.parse::<f64>().map_err(|_| "cannot parse value in data file"))
                .collect::<Result<Vec<_>, _>>()?;
            if row.len() != columns.len() {
                return Err("the number of values in a row must equal the number of columns");
            }
            rows.push(row);
        }
        Ok(InvData { columns, rows })
    }

    /// Returns the values of a column
    pub fn column(&self, name: &str) -> Result<Vec<f64>, StrError> {
        let index = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or("column does not exist in the data table")?;
        Ok(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Returns the rows matching a predicate on a given column
    pub fn filter<F>(&self, name: &str, mut predicate: F) -> Result<InvData, StrError>
    where
        F: FnMut(f64) -> bool,
    {
        let index = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or("column does not exist in the data table")?;
        Ok(InvData {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|row| predicate(row[index])).cloned().collect(),
        })
    }
}

/// Loads a SHEMAT-Suite data file with simulated and observed values
pub fn load_inv<P>(full_path: &P) -> Result<InvData, StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let content = fs::read_to_string(Path::new(full_path)).map_err(|_| "cannot read file")?;
    InvData::parse(&content)
}

/// Parses the content of a parameter file written by a gradient-based inversion
///
/// Each block starts with a header line beginning with `#` (or `%`, which is
/// treated as `#`). Each row of a block is truncated at the `unit` token and the
/// remaining values are parsed. Blank lines and lines before the first header
/// are ignored.
pub fn parse_param_blocks(content: &str) -> Result<ParamBlocks, StrError> {
    let mut blocks = ParamBlocks::new();
    let mut current: Option<String> = None;
    for raw in content.lines() {
        let line = raw.replace('%', "#");
        if line.starts_with('#') {
            let key = line.trim_end().to_string();
            blocks.entry(key.clone()).or_insert_with(Vec::new);
            current = Some(key);
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let key = match &current {
            Some(k) => k,
            None => continue,
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let end = tokens
            .iter()
            .position(|t| *t == "unit")
            .ok_or("row of parameter block must contain the 'unit' token")?;
        let row = tokens[..end]
            .iter()
            .map(|s| s.parse::<f64>().map_err(|_| "cannot parse value in parameter block"))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(block) = blocks.get_mut(key) {
            block.push(row);
        }
    }
    Ok(blocks)
}

/// Reads a parameter file written by a gradient-based inversion
pub fn read2dict<P>(full_path: &P) -> Result<ParamBlocks, StrError>
where
    P: AsRef<OsStr> + ?Sized,
{
    let content = fs::read_to_string(Path::new(full_path)).map_err(|_| "cannot read file")?;
    parse_param_blocks(&content)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{load_inv, parse_param_blocks, InvData};
    use crate::StrError;

    const DATA: &str = "SHEMAT-Suite data file\n\
                        records = 3\n\
                        % i j k unit calc obs\n\
                        3 4 10 2 45.5 46.0\n\
                        3 4 11 2 40.1 40.0\n\
                        5 1 11 3 38.2 37.9\n";

    #[test]
    fn parse_works() -> Result<(), StrError> {
        let data = InvData::parse(DATA)?;
        assert_eq!(data.columns, vec!["i", "j", "k", "unit", "calc", "obs"]);
        assert_eq!(data.rows.len(), 3);
        assert_eq!(data.column("calc")?, vec![45.5, 40.1, 38.2]);
        assert_eq!(data.column("temp").err(), Some("column does not exist in the data table"));
        let sub = data.filter("i", |v| v == 3.0)?;
        assert_eq!(sub.rows.len(), 2);
        Ok(())
    }

    #[test]
    fn parse_captures_errors() {
        assert_eq!(
            InvData::parse("a\nb\n").err(),
            Some("data file must have a header line after two leading lines")
        );
        assert_eq!(
            InvData::parse("a\nb\n% i j\n1 2 3\n").err(),
            Some("the number of values in a row must equal the number of columns")
        );
        assert_eq!(
            InvData::parse("a\nb\n% i j\n1 x\n").err(),
            Some("cannot parse value in data file")
        );
        assert_eq!(load_inv("/tmp/openwf/__does_not_exist__").err(), Some("cannot read file"));
    }

    #[test]
    fn parse_param_blocks_works() -> Result<(), StrError> {
        let content = "% units (aposteriori), iter =   final\n\
                       0.1  1.0  1.0  2.5  unit 1 Keuper\n\
                       0.05  1.0  1.0  3.1  unit 2 Lias\n\
                       \n\
                       # bcunits (aposteriori), iter =   final\n\
                       1.0  72.5  unit 1\n";
        let blocks = parse_param_blocks(content)?;
        assert_eq!(blocks.len(), 2);
        let units = blocks.get("# units (aposteriori), iter =   final").unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[1], vec![0.05, 1.0, 1.0, 3.1]);
        let bc = blocks.get("# bcunits (aposteriori), iter =   final").unwrap();
        assert_eq!(bc[0][1], 72.5);

        assert_eq!(
            parse_param_blocks("# block\n1.0 2.0\n").err(),
            Some("row of parameter block must contain the 'unit' token")
        );
        Ok(())
    }
}
