//! The `// switchchecker [-exclude a,b]` directive.

/// Keyword that marks a switch for exhaustiveness checking.
pub const TRIGGER: &str = "switchchecker";

const EXCLUDE_FLAGS: &[&str] = &["-exclude", "-e"];

/// Parsed directive of one switch statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directive {
    pub present: bool,
    /// Names to leave out of the uncovered report, in directive order.
    pub exclude_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    #[error("-exclude needs a comma-separated list of names")]
    MissingExcludeArgument,
}

/// Parse the comment block directly above a switch.
///
/// `lines` have their comment markers stripped and are trimmed. Leading empty
/// lines are skipped; only a block whose first remaining line starts with
/// [`TRIGGER`] is a directive. Flags are read
/// from that line and from the continuation lines right after it (lines that
/// start with the trigger or with `-`).
pub fn parse(lines: &[String]) -> Result<Directive, DirectiveError> {
    let start = lines.iter().position(|l| !l.is_empty()).unwrap_or(lines.len());
    let lines = &lines[start..];
    let Some(first) = lines.first() else {
        return Ok(Directive::default());
    };
    if !first.starts_with(TRIGGER) {
        return Ok(Directive::default());
    }

    let mut tokens: Vec<&str> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let rest = if let Some(rest) = line.strip_prefix(TRIGGER) {
            // `switchcheckerfoo` is one token; skip it along with the keyword.
            rest.split_once(char::is_whitespace).map_or("", |(_, r)| r)
        } else if i > 0 && line.starts_with('-') {
            line.as_str()
        } else {
            break;
        };
        tokens.extend(rest.split_whitespace());
    }

    let mut exclude_names = Vec::new();
    let mut iter = tokens.into_iter();
    while let Some(token) = iter.next() {
        if !EXCLUDE_FLAGS.contains(&token) {
            continue;
        }
        let list = iter.next().ok_or(DirectiveError::MissingExcludeArgument)?;
        exclude_names.extend(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
    }

    Ok(Directive {
        present: true,
        exclude_names,
    })
}
