use std::{
    io::{IsTerminal, Write},
    time::Instant,
};

use clap::Args;
use serde::Serialize;
use tokio::io::AsyncReadExt;

use crate::*;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Print the result as a JSON object instead of one word per line.
    #[arg(long)]
    json: bool,
    /// The prefix to look up. Leave empty to list every word.
    #[arg(name = "PREFIX")]
    prefix: Option<String>,
}

pub async fn execute_search(args: SearchArgs, options: &Options) -> anyhow::Result<()> {
    let mut sources = options.sources();

    // Words piped on stdin are indexed along with the configured sources.
    if !std::io::stdin().is_terminal() {
        let mut buf = Vec::with_capacity(256);
        tokio::io::stdin().read_to_end(&mut buf).await?;
        sources.push(Box::new(TextWords {
            text: String::from_utf8_lossy(&buf).to_string(),
        }));
    }

    let report = load_index(&sources).await?;
    let result = search(&report.index, args.prefix.as_deref().unwrap_or_default());
    info!(
        "Search for {:?} found {} of {} words",
        result.prefix,
        result.matches.len(),
        result.total_words
    );

    let mut stdout = std::io::stdout().lock();
    write_result(&mut stdout, &result, args.json)?;
    Ok(())
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The prefix after trimming and lowercasing.
    pub prefix: String,
    pub matches: Vec<String>,
    pub total_words: usize,
    pub elapsed_us: u64,
}

pub fn search(index: &PrefixIndex, prefix: &str) -> SearchResult {
    let start = Instant::now();
    let matches = index.query(prefix);
    let elapsed = start.elapsed();

    SearchResult {
        prefix: normalize(prefix),
        matches,
        total_words: index.count(),
        elapsed_us: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
    }
}

pub fn write_result(out: &mut impl Write, result: &SearchResult, json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, result)?;
        writeln!(out)?;
    } else {
        for word in &result.matches {
            writeln!(out, "{}", word)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SEED_WORDS;

    fn output(result: &SearchResult, json: bool) -> String {
        let mut out = Vec::new();
        write_result(&mut out, result, json).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_output() {
        let index: PrefixIndex = SEED_WORDS.iter().collect();
        let result = search(&index, " Do ");

        assert_eq!(result.prefix, "do");
        assert_eq!(result.total_words, 49);
        assert_eq!(output(&result, false), "dog\ndoll\ndove\n");
    }

    #[test]
    fn test_json_output() {
        let index: PrefixIndex = SEED_WORDS.iter().collect();
        let result = search(&index, "fo");

        let value: serde_json::Value = serde_json::from_str(&output(&result, true)).unwrap();
        assert_eq!(value["prefix"], "fo");
        assert_eq!(value["matches"], serde_json::json!(["forest", "fortune"]));
        assert_eq!(value["total_words"], 49);
        assert!(value["elapsed_us"].is_u64());
    }

    #[test]
    fn test_no_matches() {
        let index: PrefixIndex = SEED_WORDS.iter().collect();
        let result = search(&index, "a1");

        assert!(result.matches.is_empty());
        assert_eq!(output(&result, false), "");

        let value: serde_json::Value = serde_json::from_str(&output(&result, true)).unwrap();
        assert_eq!(value["matches"], serde_json::json!([]));
    }
}
