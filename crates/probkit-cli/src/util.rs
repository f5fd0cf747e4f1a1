use std::{
    fs::File,
    io::{self, BufReader, BufWriter},
    path::Path,
};

use anyhow::Context;

/// Writes `value` as pretty JSON to `output`, or to stdout when it is `None`.
pub fn save_json<T>(value: &T, output: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_json(BufWriter::new(file), value, &path.display().to_string())
        }
        None => write_json(io::stdout().lock(), value, "stdout"),
    }
}

fn write_json<W, T>(mut writer: W, value: &T, target: &str) -> anyhow::Result<()>
where
    W: io::Write,
    T: serde::Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer).with_context(|| format!("Failed to write to {target}"))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {target}"))
}

/// Opens `path` for reading, with `-` meaning stdin.
fn open_input(path: &Path) -> anyhow::Result<Box<dyn io::BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Reads the numeric fields of each non-empty line, skipping `#` comments.
///
/// Fields may be separated by whitespace or commas.
fn parse_rows<R>(reader: R, source: &str) -> anyhow::Result<Vec<Vec<f64>>>
where
    R: io::BufRead,
{
    let mut rows = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {} of {source}", i + 1))?;
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        let row = content
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|field| !field.is_empty())
            .map(|field| {
                field
                    .parse::<f64>()
                    .with_context(|| format!("Invalid number '{field}' at {source}:{}", i + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

fn read_rows(path: &Path) -> anyhow::Result<Vec<Vec<f64>>> {
    parse_rows(open_input(path)?, &path.display().to_string())
}

/// Reads every number in the file, in order.
pub fn read_numbers(path: &Path) -> anyhow::Result<Vec<f64>> {
    let values = read_rows(path)?.into_iter().flatten().collect::<Vec<_>>();
    anyhow::ensure!(!values.is_empty(), "No numbers found in {}", path.display());
    Ok(values)
}

/// Reads a two-column file as paired `(xs, ys)`.
pub fn read_pairs(path: &Path) -> anyhow::Result<(Vec<f64>, Vec<f64>)> {
    rows_to_pairs(read_rows(path)?, &path.display().to_string())
}

fn rows_to_pairs(rows: Vec<Vec<f64>>, source: &str) -> anyhow::Result<(Vec<f64>, Vec<f64>)> {
    anyhow::ensure!(!rows.is_empty(), "No rows found in {source}");
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row[..] {
            [x, y] => Ok((x, y)),
            _ => anyhow::bail!(
                "Expected 2 columns in row {} of {source}, found {}",
                i + 1,
                row.len()
            ),
        })
        .collect()
}
