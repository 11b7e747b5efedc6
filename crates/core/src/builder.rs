//! Statement builder
//!
//! Turns the selected text into the source of one (or, with merging off,
//! several) `console.log` calls. Variable names are interpolated verbatim;
//! a name containing a quote produces a broken statement, which is accepted.
//!
//! With the default configuration, selecting `a` yields:
//!
//! ```text
//! console.log(
//!   '%c sulog %c a:',
//!   'color: #fff; background: #ff4e20;',
//!   'font-size: 14px; font-weight: bold;',
//!   a,
//! );
//! ```

use crate::config::Configuration;
use crate::style;

const CALL_OPEN: &str = "console.log(";
const CALL_CLOSE: &str = ");";
const ARG_INDENT: &str = "  ";

/// Split a selection into variable names
///
/// Pieces are separated by `,`, trimmed, and dropped when empty.
pub fn variables(selection: &str) -> Vec<&str> {
    selection
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Build the statement text for `selected` (unindented, `\n` line breaks)
///
/// No selection, or one without any variable name, yields a bare marker
/// statement carrying only the prefix.
pub fn build_statement(selected: Option<&str>, config: &Configuration) -> String {
    let styles = Styles::new(config);
    let prefix = config.prefix.as_str();
    let names = selected.map(variables).unwrap_or_default();

    match names.as_slice() {
        [] => styles.bare(prefix),
        [name] => styles.labelled(prefix, name, name),
        names if config.merge_multi_variables => {
            let label = names.join(", ");
            let value = format!("{{ {label} }}");
            styles.labelled(prefix, &label, &value)
        }
        names => names
            .iter()
            .map(|name| styles.labelled(prefix, name, name))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

struct Styles {
    prefix: Option<String>,
    label: Option<String>,
}

impl Styles {
    fn new(config: &Configuration) -> Self {
        Self {
            prefix: style::prefix_style(config),
            label: style::label_style(config),
        }
    }

    fn bare(&self, prefix: &str) -> String {
        match &self.prefix {
            Some(prefix_style) => call(&[quote(&format!("%c {prefix}")), quote(prefix_style)]),
            None => call(&[quote(prefix)]),
        }
    }

    fn labelled(&self, prefix: &str, label: &str, value: &str) -> String {
        let prefix_marker = if self.prefix.is_some() { "%c " } else { "" };
        let label_marker = if self.label.is_some() { "%c " } else { "" };

        let mut args = vec![quote(&format!(
            "{prefix_marker}{prefix} {label_marker}{label}:"
        ))];
        args.extend(self.prefix.as_deref().map(quote));
        args.extend(self.label.as_deref().map(quote));
        args.push(value.to_string());

        call(&args)
    }
}

fn quote(text: &str) -> String {
    format!("'{text}'")
}

fn call(args: &[String]) -> String {
    let mut lines = Vec::with_capacity(args.len() + 2);
    lines.push(CALL_OPEN.to_string());
    lines.extend(args.iter().map(|arg| format!("{ARG_INDENT}{arg},")));
    lines.push(CALL_CLOSE.to_string());
    lines.join("\n")
}
