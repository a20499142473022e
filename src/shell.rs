use std::{
    io::Write,
    str::FromStr,
    sync::Arc,
    time::{Duration, Instant},
};

use clap::Args;
use thiserror::Error;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines},
    sync::RwLock,
};

use crate::*;

#[derive(Args, Debug, Default)]
pub struct ShellArgs {
    /// Skip the banner printed at startup.
    #[arg(long)]
    no_banner: bool,
}

/// The index as shared by the interactive session. Queries take the read
/// lock, insertions the write lock.
pub type SharedIndex = Arc<RwLock<PrefixIndex>>;

pub async fn execute_shell(args: ShellArgs, options: &Options) -> anyhow::Result<()> {
    let render = Renderer::new(!options.no_color);
    let mut stdout = std::io::stdout();

    if !args.no_banner {
        render.banner(&mut stdout)?;
    }
    render.hint(&mut stdout, "Loading dictionary and building trie structure...")?;

    let report = load_index(&options.sources()).await?;
    render.loaded(&mut stdout, report.index.count(), report.elapsed)?;

    let index = Arc::new(RwLock::new(report.index));
    let stdin = BufReader::new(tokio::io::stdin());
    Shell::new(index, stdin, stdout, render)
        .with_load_time(report.elapsed)
        .run()
        .await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Search,
    Add,
    Statistics,
    Help,
    Exit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MenuError {
    #[error("Invalid input \"{0}\". Please enter a number between 1-5.")]
    NotANumber(String),

    #[error("Invalid choice {0}. Please select a number between 1-5.")]
    OutOfRange(i64),
}

impl FromStr for MenuChoice {
    type Err = MenuError;

    /// Reads the leading integer of the line and ignores whatever follows it,
    /// so `"3abc"` selects option 3.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let sign = usize::from(s.starts_with(['+', '-']));
        let end = s[sign..]
            .find(|c: char| !c.is_ascii_digit())
            .map_or(s.len(), |i| i + sign);
        let n = s[..end]
            .parse::<i64>()
            .map_err(|_| MenuError::NotANumber(s.to_string()))?;

        match n {
            1 => Ok(Self::Search),
            2 => Ok(Self::Add),
            3 => Ok(Self::Statistics),
            4 => Ok(Self::Help),
            5 => Ok(Self::Exit),
            n => Err(MenuError::OutOfRange(n)),
        }
    }
}

/// Menu loop reading lines from `R` and writing the rendered screens to `W`.
pub struct Shell<R, W> {
    index: SharedIndex,
    lines: Lines<R>,
    out: W,
    render: Renderer,
    load_time: Duration,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(index: SharedIndex, input: R, out: W, render: Renderer) -> Self {
        Self {
            index,
            lines: input.lines(),
            out,
            render,
            load_time: Duration::ZERO,
        }
    }

    /// How long the dictionary took to build, shown on the statistics screen.
    pub fn with_load_time(mut self, load_time: Duration) -> Self {
        self.load_time = load_time;
        self
    }

    /// Runs until the user picks Exit or the input ends.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            self.render.menu(&mut self.out)?;

            let Some(line) = self.lines.next_line().await? else {
                info!("Input closed, ending session");
                writeln!(self.out)?;
                return Ok(());
            };

            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(err) => {
                    warn!("Rejected menu input {:?}: {:?}", line, err);
                    writeln!(self.out)?;
                    self.render.error(&mut self.out, &err.to_string())?;
                    writeln!(self.out)?;
                    continue;
                }
            };
            debug!("Menu choice: {:?}", choice);

            match choice {
                MenuChoice::Search => self.search().await?,
                MenuChoice::Add => self.add().await?,
                MenuChoice::Statistics => self.statistics().await?,
                MenuChoice::Help => self.render.help(&mut self.out)?,
                MenuChoice::Exit => {
                    info!("Session ended by user");
                    self.render.goodbye(&mut self.out)?;
                    return Ok(());
                }
            }
        }
    }

    async fn search(&mut self) -> anyhow::Result<()> {
        self.render.prompt(
            &mut self.out,
            "Enter search prefix",
            Some("(or press Enter to show all)"),
        )?;
        let prefix = self.lines.next_line().await?.unwrap_or_default();

        let index = self.index.read().await;
        if index.is_empty() {
            writeln!(self.out)?;
            self.render
                .info(&mut self.out, "The dictionary is empty. Add words with option 2.")?;
            writeln!(self.out)?;
            return Ok(());
        }

        let start = Instant::now();
        let words = index.query(&prefix);
        let elapsed = start.elapsed();
        drop(index);
        debug!(
            "Query {:?} returned {} words in {} us",
            prefix,
            words.len(),
            elapsed.as_micros()
        );

        if words.is_empty() {
            self.render.no_suggestions(&mut self.out, &prefix)?;
        } else {
            writeln!(self.out)?;
            self.render.suggestions(&mut self.out, &words, elapsed)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    async fn add(&mut self) -> anyhow::Result<()> {
        self.render.prompt(&mut self.out, "Enter new word to add", None)?;
        let raw = self.lines.next_line().await?.unwrap_or_default();
        let word = raw.trim();
        writeln!(self.out)?;

        if word.is_empty() {
            self.render
                .error(&mut self.out, "Cannot add empty word. Please try again.")?;
        } else if normalize_word(word).is_empty() {
            self.render.error(
                &mut self.out,
                &format!("\"{word}\" contains no letters and cannot be added."),
            )?;
        } else {
            let mut index = self.index.write().await;
            if index.contains(word) {
                self.render.info(
                    &mut self.out,
                    &format!("Word \"{word}\" already exists in dictionary."),
                )?;
            } else {
                index.insert(word);
                info!("Added {:?}, index now holds {} words", word, index.count());
                self.render.success(
                    &mut self.out,
                    &format!("Successfully added \"{word}\" to dictionary!"),
                )?;
                self.render.hint(
                    &mut self.out,
                    &format!("Dictionary now contains {} words.", index.count()),
                )?;
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    async fn statistics(&mut self) -> anyhow::Result<()> {
        let stats = {
            let index = self.index.read().await;
            Statistics {
                words: index.count(),
                nodes: index.node_count(),
                load_time: self.load_time,
            }
        };
        writeln!(self.out)?;
        self.render.statistics(&mut self.out, stats)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SEED_WORDS;

    async fn run_script(index: &SharedIndex, script: &str) -> String {
        let _ = tracing_subscriber::fmt::try_init();

        let mut out = Vec::new();
        let input = BufReader::new(script.as_bytes());
        Shell::new(index.clone(), input, &mut out, Renderer::new(false))
            .run()
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn seeded() -> SharedIndex {
        Arc::new(RwLock::new(SEED_WORDS.iter().collect()))
    }

    #[test]
    fn test_menu_choice_parsing() {
        assert_eq!(" 1 ".parse::<MenuChoice>(), Ok(MenuChoice::Search));
        assert_eq!("5".parse::<MenuChoice>(), Ok(MenuChoice::Exit));
        assert_eq!("0".parse::<MenuChoice>(), Err(MenuError::OutOfRange(0)));
        assert_eq!("6".parse::<MenuChoice>(), Err(MenuError::OutOfRange(6)));
        assert_eq!(
            "two".parse::<MenuChoice>(),
            Err(MenuError::NotANumber("two".into()))
        );
        assert_eq!(
            "".parse::<MenuChoice>(),
            Err(MenuError::NotANumber(String::new()))
        );
        assert_eq!("3abc".parse::<MenuChoice>(), Ok(MenuChoice::Statistics));
        assert_eq!("4 5".parse::<MenuChoice>(), Ok(MenuChoice::Help));
        assert_eq!("+2".parse::<MenuChoice>(), Ok(MenuChoice::Add));
        assert_eq!("-1".parse::<MenuChoice>(), Err(MenuError::OutOfRange(-1)));
        assert_eq!(
            "x3".parse::<MenuChoice>(),
            Err(MenuError::NotANumber("x3".into()))
        );
        assert_eq!(
            "-".parse::<MenuChoice>(),
            Err(MenuError::NotANumber("-".into()))
        );
    }

    #[tokio::test]
    async fn test_search_then_exit() {
        let index = seeded();
        let out = run_script(&index, "1\nAP\n5\n").await;

        assert!(out.contains("Found 6 matches"));
        assert!(out.contains("[ 1]  apartment"));
        assert!(out.contains("[ 6]  apricot"));
        assert!(out.contains("Thank you for using Trie Auto-Suggest!"));
    }

    #[tokio::test]
    async fn test_search_without_matches() {
        let index = seeded();
        let out = run_script(&index, "1\nxyz\n5\n").await;
        assert!(out.contains("No suggestions found for \"xyz\""));
        assert!(out.contains("Try a different prefix"));
    }

    #[tokio::test]
    async fn test_add_words() {
        let index = seeded();
        let out = run_script(&index, "2\nTesting\n2\ntesting\n2\n   \n2\n123\n1\ntest\n5\n").await;

        assert!(out.contains("Successfully added \"Testing\" to dictionary!"));
        assert!(out.contains("Dictionary now contains 50 words."));
        assert!(out.contains("Word \"testing\" already exists in dictionary."));
        assert!(out.contains("Cannot add empty word. Please try again."));
        assert!(out.contains("\"123\" contains no letters"));
        assert!(out.contains("Found 1 match (in"));
        assert_eq!(index.read().await.count(), 50);
    }

    #[tokio::test]
    async fn test_invalid_choices_keep_looping() {
        let index = seeded();
        let out = run_script(&index, "abc\n9\n3\n4\n5\n").await;

        assert!(out.contains("Invalid input \"abc\". Please enter a number between 1-5."));
        assert!(out.contains("Invalid choice 9. Please select a number between 1-5."));
        assert!(out.contains("Total Words:        49"));
        assert!(out.contains("HELP & DOCUMENTATION"));
        assert!(out.contains("Session terminated. Goodbye!"));
    }

    #[tokio::test]
    async fn test_empty_dictionary() {
        let index = SharedIndex::default();
        let out = run_script(&index, "1\nap\n2\nkiwi\n1\nki\n5\n").await;

        assert!(out.contains("The dictionary is empty. Add words with option 2."));
        assert!(out.contains("Found 1 match (in"));
        assert!(out.contains("[ 1]  kiwi"));
    }

    #[tokio::test]
    async fn test_statistics_show_load_time() {
        let mut out = Vec::new();
        let input = BufReader::new("3\n5\n".as_bytes());
        Shell::new(seeded(), input, &mut out, Renderer::new(false))
            .with_load_time(Duration::from_micros(1500))
            .run()
            .await
            .unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Load Time:          1.500ms"));
        assert!(out.contains("Performance:        Sub-millisecond search times"));
    }

    #[tokio::test]
    async fn test_end_of_input_ends_session() {
        let index = seeded();
        let out = run_script(&index, "1\n").await;

        // An empty prefix lists the whole dictionary.
        assert!(out.contains("Found 49 matches"));
        assert!(!out.contains("Goodbye"));
    }
}
