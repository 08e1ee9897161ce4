use std::{
    collections::BTreeSet,
    fmt,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use super::{
    category::EventCategory,
    error::Error,
    metrics::Metrics,
};

/// Lines of one log file, loaded once and queried per event category.
///
/// Lines are kept as raw bytes, two lines are equal only if every byte is.
pub struct LogEventCounter {
    lines: Vec<Vec<u8>>,
}

impl LogEventCounter {
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        LogEventCounter {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits the input on `\n` only, a trailing `\r` stays in the line.
    /// Invalid UTF-8 is kept as is.
    pub fn from_reader<R>(mut reader: R) -> io::Result<Self>
    where
        R: BufRead,
    {
        let mut lines = vec![];
        loop {
            let mut buf = vec![];
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
            }
            if let Err(err) = std::str::from_utf8(&buf) {
                log::debug!(
                    "line {} is not valid utf-8 at byte {}: {}",
                    lines.len() + 1,
                    err.valid_up_to(),
                    String::from_utf8_lossy(&buf),
                );
            }
            lines.push(buf);
        }

        Ok(LogEventCounter { lines })
    }

    pub fn open<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file_access = |source| Error::FileAccess {
            path: path.to_owned(),
            source,
        };

        let file = File::open(path).map_err(file_access)?;
        let this = Self::from_reader(BufReader::new(file)).map_err(file_access)?;
        log::info!("loaded {}, {} lines", path.display(), this.lines.len());

        Ok(this)
    }

    pub fn lines(&self) -> impl Iterator<Item = &[u8]> {
        self.lines.iter().map(Vec::as_slice)
    }

    /// Lines containing `pattern`, in file order. Literal, case-sensitive match.
    pub fn matches<'a>(&'a self, pattern: &'a str) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.lines()
            .filter(move |line| contains(line, pattern.as_bytes()))
    }

    pub fn count(&self, pattern: &str) -> Metrics {
        let matches = self.matches(pattern).collect::<Vec<_>>();
        let unique = matches.iter().copied().collect::<BTreeSet<_>>().len();

        Metrics {
            total: matches.len(),
            unique,
        }
    }

    pub fn report(&self) -> Report {
        let entries = EventCategory::ALL.map(|category| {
            let metrics = self.count(category.pattern());
            log::debug!(
                "{category}: total {}, unique {}",
                metrics.total,
                metrics.unique
            );
            if metrics.total == 0 {
                log::warn!("no lines contain \"{}\"", category.pattern());
            }
            (category, metrics)
        });

        Report { entries }
    }
}

fn contains(line: &[u8], pattern: &[u8]) -> bool {
    pattern.is_empty() || line.windows(pattern.len()).any(|w| w == pattern)
}

/// Metrics of every category, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    entries: [(EventCategory, Metrics); 2],
}

impl Report {
    pub fn get(&self, category: EventCategory) -> Metrics {
        self.entries
            .iter()
            .find_map(|(c, m)| (*c == category).then_some(*m))
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(EventCategory, Metrics)> {
        self.entries.iter()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (category, metrics) in &self.entries {
            write!(
                f,
                "{category} events: {}, unique: {}, efficiency: ",
                metrics.total, metrics.unique
            )?;
            match metrics.efficiency() {
                Some(efficiency) => writeln!(f, "{efficiency}")?,
                None => writeln!(f, "N/A")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::{EventCategory, LogEventCounter};

    fn counter(text: &[u8]) -> LogEventCounter {
        LogEventCounter::from_reader(Cursor::new(text)).unwrap()
    }

    #[test]
    fn split_lines() {
        let c = counter(b"a\r\nb\n\nc");
        let lines = c.lines().collect::<Vec<_>>();
        let expected: [&[u8]; 4] = [b"a\r", b"b", b"", b"c"];
        assert_eq!(lines, expected);
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert_eq!(counter(b"").lines().count(), 0);
    }

    #[test]
    fn invalid_utf8_is_kept() {
        let c = counter(b"x added to our current block \xff\nok\n");
        assert_eq!(c.lines().next(), Some(&b"x added to our current block \xff"[..]));
        assert_eq!(c.count(EventCategory::Add.pattern()).total, 1);
    }

    #[test]
    fn lines_differing_in_invalid_bytes_are_distinct() {
        let c = counter(
            b"x added to our current block \xff\n\
              x added to our current block \xfe\n",
        );
        let m = c.count(EventCategory::Add.pattern());
        assert_eq!((m.total, m.unique), (2, 2));
    }

    #[test]
    fn from_lines_in_memory() {
        let c = LogEventCounter::new([
            "a removed from our current block",
            "a removed from our current block",
            "b added to our current block",
        ]);
        assert_eq!(
            c.report().to_string(),
            "Add events: 1, unique: 1, efficiency: 1.0000\n\
             Remove events: 2, unique: 1, efficiency: 0.5000\n"
        );
    }

    #[test]
    fn match_is_case_sensitive() {
        let c = counter(b"Node(aa..) Added to our current block\n");
        assert_eq!(c.count(EventCategory::Add.pattern()).total, 0);
    }

    #[test]
    fn uniqueness_compares_whole_line() {
        let c = counter(
            b"Node(aa..): bb.. added to our current block\n\
              Node(cc..): bb.. added to our current block\n\
              Node(aa..): bb.. added to our current block\n",
        );
        let m = c.count(EventCategory::Add.pattern());
        assert_eq!((m.total, m.unique), (3, 2));
    }

    #[test]
    fn matches_keep_file_order() {
        let c = counter(b"2 removed from our current block\nnoise\n1 removed from our current block\n");
        let matches = c.matches(EventCategory::Remove.pattern()).collect::<Vec<_>>();
        let expected: [&[u8]; 2] = [
            b"2 removed from our current block",
            b"1 removed from our current block",
        ];
        assert_eq!(matches, expected);
    }

    #[test]
    fn report_format() {
        let c = counter(
            b"a added to our current block\n\
              a added to our current block\n\
              b removed from our current block\n",
        );
        assert_eq!(
            c.report().to_string(),
            "Add events: 2, unique: 1, efficiency: 0.5000\n\
             Remove events: 1, unique: 1, efficiency: 1.0000\n"
        );
    }

    #[test]
    fn report_without_matches() {
        assert_eq!(
            counter(b"nothing here\n").report().to_string(),
            "Add events: 0, unique: 0, efficiency: N/A\n\
             Remove events: 0, unique: 0, efficiency: N/A\n"
        );
    }
}
