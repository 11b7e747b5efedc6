//! Statement remover
//!
//! Recognises statements written by the builder through their first
//! argument, a quoted string that starts with the configured prefix:
//!
//! - styled: `'%c <prefix>...'` (the space after `%c` is optional), or
//!   `'<prefix> <label>:'` as produced when no prefix style is configured
//! - plain: exactly `'<prefix>'`
//!
//! Matching is lexical. A statement must start its own physical line and
//! ends at the first `);` after its first argument, which may be several
//! lines further down. When nothing but whitespace follows that `);`, the
//! whole lines are deleted so no blank line is left behind; otherwise only
//! the call goes and the rest of the line stays where it was.
//!
//! A statement on the last line of a text without a final line break takes
//! the break before it along. That undoes an append at end of text exactly,
//! but it also means `"a();\n\nconsole.log('sulog');"` becomes `"a();\n"`.

use regex::Regex;

use crate::error::{Error, Result};

/// Outcome of one removal run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub text: String,
    pub styled: usize,
    pub plain: usize,
}

impl Removal {
    /// Total number of statements removed
    pub fn removed(&self) -> usize {
        self.styled + self.plain
    }
}

/// The two compiled statement patterns for one prefix
#[derive(Debug, Clone)]
pub struct StatementPatterns {
    styled: Regex,
    plain: Regex,
}

impl StatementPatterns {
    pub fn new(prefix: &str) -> Result<Self> {
        if prefix.is_empty() {
            return Err(Error::EmptyPrefix);
        }
        let prefix = regex::escape(prefix);

        let styled = quoted(|q| {
            format!(r"(?:%c ?{prefix}(?:[ \t][^{q}\r\n]*)?|{prefix}[ \t][^{q}\r\n]*)")
        });
        let plain = quoted(|_| prefix.clone());

        Ok(Self {
            styled: Regex::new(&statement(&styled))?,
            plain: Regex::new(&statement(&plain))?,
        })
    }

    /// Remove styled statements first, then plain ones from what is left
    pub fn remove(&self, text: &str) -> Removal {
        let (text, styled) = strip(&self.styled, text);
        let (text, plain) = strip(&self.plain, &text);
        tracing::debug!(styled, plain, "Matched sulog statements");
        Removal {
            text,
            styled,
            plain,
        }
    }
}

/// Remove every statement carrying `prefix` from `text`
pub fn remove_statements(text: &str, prefix: &str) -> Result<Removal> {
    Ok(StatementPatterns::new(prefix)?.remove(text))
}

/// Alternation of the single- and double-quoted forms of a string body
fn quoted(body: impl Fn(char) -> String) -> String {
    ['\'', '"']
        .iter()
        .map(|&q| format!("{q}{}{q}", body(q)))
        .collect::<Vec<_>>()
        .join("|")
}

/// Statement pattern around a first-argument pattern
///
/// Captures the indentation, whatever follows the closing `);` on its line,
/// and the line break ending that line.
fn statement(first_arg: &str) -> String {
    format!(
        r"(?m)^(?P<indent>[ \t]*)console\.log\(\s*(?:{first_arg})[\s\S]*?\);(?P<rest>[^\r\n]*)(?P<trail>\r?\n)?"
    )
}

fn strip(pattern: &Regex, text: &str) -> (String, usize) {
    let mut count = 0;
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in pattern.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&text[last..whole.start()]);
        last = whole.end();
        count += 1;

        let rest = caps.name("rest").map_or("", |m| m.as_str());
        let trail = caps.name("trail").map_or("", |m| m.as_str());
        if !rest.trim().is_empty() {
            // Code after the call on the same line
            out.push_str(caps.name("indent").map_or("", |m| m.as_str()));
            out.push_str(rest.trim_start());
            out.push_str(trail);
        } else if trail.is_empty() && whole.end() == text.len() {
            trim_line_break(&mut out);
        }
    }
    out.push_str(&text[last..]);

    (out, count)
}

fn trim_line_break(out: &mut String) {
    if out.ends_with("\r\n") {
        out.truncate(out.len() - 2);
    } else if out.ends_with('\n') {
        out.truncate(out.len() - 1);
    }
}
