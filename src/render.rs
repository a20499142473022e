use std::{
    fmt::Display,
    io::{self, Write},
    time::Duration,
};

use crossterm::style::{StyledContent, Stylize};

const WIDTH: usize = 54;

/// Snapshot of the index shown on the statistics screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub words: usize,
    pub nodes: usize,
    pub load_time: Duration,
}

/// Console output for the driver. With `color` off nothing but plain text is written.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint<D: Display>(&self, styled: StyledContent<D>) -> String {
        if self.color {
            styled.to_string()
        } else {
            styled.content().to_string()
        }
    }

    fn thick_line(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "  {}", self.paint("=".repeat(WIDTH).cyan().bold()))
    }

    fn line(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "  {}", self.paint("-".repeat(WIDTH).dim()))
    }

    fn heading(&self, out: &mut impl Write, title: &str) -> io::Result<()> {
        writeln!(out)?;
        self.thick_line(out)?;
        writeln!(out, "\n  {}\n", self.paint(title.magenta().bold()))?;
        self.line(out)
    }

    pub fn banner(&self, out: &mut impl Write) -> io::Result<()> {
        let title = [
            "╔══════════════════════════════════════════════════════╗",
            "║                                                      ║",
            "║           TRIE AUTO-SUGGEST                          ║",
            "║           Prefix-based word search                   ║",
            "║                                                      ║",
            "╚══════════════════════════════════════════════════════╝",
        ];
        writeln!(out)?;
        for row in title {
            writeln!(out, "  {}", self.paint(row.cyan().bold()))?;
        }
        writeln!(out)
    }

    pub fn success(&self, out: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(
            out,
            "  {} {}",
            self.paint("✓".green().bold()),
            self.paint(msg.green())
        )
    }

    pub fn error(&self, out: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(
            out,
            "  {} {}",
            self.paint("✗".red().bold()),
            self.paint(msg.red())
        )
    }

    pub fn info(&self, out: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(out, "  {}", self.paint(format!("ℹ {msg}").blue()))
    }

    pub fn hint(&self, out: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(out, "  {}", self.paint(msg.dim()))
    }

    /// Writes a prompt without a trailing newline and flushes it.
    pub fn prompt(&self, out: &mut impl Write, label: &str, note: Option<&str>) -> io::Result<()> {
        write!(out, "\n  {}", self.paint(format!("→ {label}").yellow()))?;
        if let Some(note) = note {
            write!(out, " {}", self.paint(note.dim()))?;
        }
        write!(out, ": ")?;
        out.flush()
    }

    pub fn loaded(&self, out: &mut impl Write, words: usize, elapsed: Duration) -> io::Result<()> {
        self.success(
            out,
            &format!(
                "System ready! Loaded {} words in {:.3}ms",
                words,
                elapsed.as_secs_f64() * 1000.0
            ),
        )
    }

    pub fn menu(&self, out: &mut impl Write) -> io::Result<()> {
        let options = [
            "Search for Suggestions",
            "Add New Word",
            "View Statistics",
            "Help & Documentation",
            "Exit Program",
        ];

        writeln!(out)?;
        self.thick_line(out)?;
        writeln!(out, "\n  {}\n", self.paint("SELECT AN OPTION:".yellow().bold()))?;
        for (i, option) in options.iter().enumerate() {
            writeln!(
                out,
                "    {}  {}",
                self.paint(format!("[{}]", i + 1).cyan().bold()),
                option
            )?;
        }
        writeln!(out)?;
        self.thick_line(out)?;
        write!(out, "\n  {}", self.paint("→ Your choice: ".yellow()))?;
        out.flush()
    }

    pub fn suggestions(
        &self,
        out: &mut impl Write,
        words: &[String],
        elapsed: Duration,
    ) -> io::Result<()> {
        let noun = if words.len() == 1 { "match" } else { "matches" };

        writeln!(out)?;
        self.thick_line(out)?;
        writeln!(
            out,
            "\n  {} {}\n",
            self.paint(format!("✓ Found {} {}", words.len(), noun).green().bold()),
            self.paint(format!("(in {}μs)", elapsed.as_micros()).dim())
        )?;
        self.line(out)?;
        writeln!(out)?;
        for (i, word) in words.iter().enumerate() {
            writeln!(
                out,
                "    {}  {}",
                self.paint(format!("[{:>2}]", i + 1).dim()),
                self.paint(word.as_str().cyan())
            )?;
        }
        writeln!(out)?;
        self.thick_line(out)
    }

    pub fn no_suggestions(&self, out: &mut impl Write, prefix: &str) -> io::Result<()> {
        writeln!(out)?;
        self.error(out, &format!("No suggestions found for \"{prefix}\""))?;
        self.hint(out, "Try a different prefix or check spelling.")
    }

    pub fn statistics(&self, out: &mut impl Write, stats: Statistics) -> io::Result<()> {
        let rows = [
            ("Total Words:", stats.words.to_string()),
            ("Tree Nodes:", stats.nodes.to_string()),
            ("Data Structure:", "Trie (Prefix Tree)".to_string()),
            ("Search Algorithm:", "Prefix Matching + DFS Traversal".to_string()),
            ("Result Sorting:", "Alphabetical".to_string()),
            (
                "Load Time:",
                format!("{:.3}ms", stats.load_time.as_secs_f64() * 1000.0),
            ),
            ("Performance:", "Sub-millisecond search times".to_string()),
        ];

        self.heading(out, "SYSTEM STATISTICS")?;
        writeln!(out)?;
        for (label, value) in rows {
            writeln!(out, "  {} {}", self.paint(format!("{label:<19}").cyan()), value)?;
        }
        writeln!(out)?;
        self.line(out)?;
        writeln!(out)?;
        self.hint(out, "Tip: Press Enter at search prompt to view all words")?;
        writeln!(out)?;
        self.thick_line(out)
    }

    pub fn help(&self, out: &mut impl Write) -> io::Result<()> {
        self.heading(out, "HELP & DOCUMENTATION")?;

        writeln!(out, "\n  {}\n", self.paint("How to Use:".cyan().bold()))?;
        writeln!(out, "    • Enter any prefix to see matching words")?;
        writeln!(out, "    • Press Enter (empty) to display all words")?;
        writeln!(out, "    • Search is case-insensitive: \"AP\" = \"ap\"")?;
        writeln!(out, "    • Add words dynamically during runtime\n")?;
        self.line(out)?;

        writeln!(out, "\n  {}\n", self.paint("Examples:".cyan().bold()))?;
        let examples = [
            ("\"ap\"", "apartment, app, apple, appetite, apply, apricot"),
            ("\"ba\"", "badge, balance, ball, banana, bat, battle"),
            ("\"\"", "Displays all dictionary words"),
        ];
        for (prefix, result) in examples {
            writeln!(
                out,
                "    Prefix: {}  →  {}",
                self.paint(format!("{prefix:<4}").yellow()),
                result
            )?;
        }
        writeln!(out)?;
        self.line(out)?;

        writeln!(out, "\n  {}\n", self.paint("Complexity:".cyan().bold()))?;
        let complexity = [
            ("Insert:", "O(L)", "L = word length"),
            ("Search:", "O(L + K×M)", "K = results, M = avg length"),
            ("Space:", "O(N×M)", "N = words, M = avg length"),
        ];
        for (op, cost, note) in complexity {
            writeln!(
                out,
                "    • {:<8} {} — {}",
                op,
                self.paint(cost.green()),
                note
            )?;
        }
        writeln!(out)?;
        self.thick_line(out)
    }

    pub fn goodbye(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        self.thick_line(out)?;
        writeln!(out)?;
        self.success(out, "Thank you for using Trie Auto-Suggest!")?;
        self.hint(out, "Session terminated. Goodbye!")?;
        writeln!(out)?;
        self.thick_line(out)
    }
}
