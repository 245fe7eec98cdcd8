//! Robot Framework runner generation.

use std::fmt::Write as _;

/// One test case: its name and the script path relative to the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerCase {
    pub name: String,
    pub script: String,
}

impl RunnerCase {
    /// Case for a repository-relative `file`, reached from the runner via `script`.
    #[must_use]
    pub fn new(file: &str, script: impl Into<String>) -> Self {
        let name = file
            .rsplit_once('.')
            .filter(|(stem, ext)| !stem.is_empty() && !ext.contains('/'))
            .map_or(file, |(stem, _)| stem);
        Self {
            name: name.to_string(),
            script: script.into(),
        }
    }
}

/// Render a suite that runs each case with `interpreter` and expects exit code 0.
#[must_use]
pub fn render_runner(interpreter: &str, cases: &[RunnerCase]) -> String {
    let mut out = String::from("*** Settings ***\nLibrary    Process\n\n*** Test Cases ***\n");
    for case in cases {
        let _ = write!(
            out,
            "{name}\n    ${{result}}=    Run Process    {interpreter}    ${{CURDIR}}/{script}    cwd=${{CURDIR}}\n    Should Be Equal As Integers    ${{result.rc}}    0\n\n",
            name = escape_cell(&case.name),
            script = escape_cell(&case.script),
            interpreter = escape_cell(interpreter),
        );
    }
    out
}

/// Escape `value` so Robot reads it back as one literal cell.
fn escape_cell(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '$' | '@' | '&' | '%' if chars.get(i + 1) == Some(&'{') => {
                out.push('\\');
                out.push(c);
            }
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            // Two spaces separate cells; leading and trailing ones are stripped.
            ' ' if i == 0 || i + 1 == chars.len() || chars[i - 1] == ' ' => {
                out.push_str("${SPACE}");
            }
            '#' | '*' | '|' if i == 0 => {
                out.push('\\');
                out.push(c);
            }
            '=' => out.push_str("\\="),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn case_names_drop_the_extension() {
        assert_eq!(RunnerCase::new("checks/ping.py", "x").name, "checks/ping");
        assert_eq!(RunnerCase::new("Makefile", "x").name, "Makefile");
        assert_eq!(RunnerCase::new("v1.2/run", "x").name, "v1.2/run");
    }

    #[test]
    fn renders_one_case_per_file() {
        let cases = [
            RunnerCase::new("checks/ping.py", "../checks/ping.py"),
            RunnerCase::new("reboot.py", "../reboot.py"),
        ];
        let text = render_runner("python3", &cases);
        assert!(text.starts_with("*** Settings ***\nLibrary    Process\n"));
        assert!(text.contains(
            "checks/ping\n    ${result}=    Run Process    python3    ${CURDIR}/../checks/ping.py    cwd=${CURDIR}\n"
        ));
        assert_eq!(text.matches("Should Be Equal As Integers    ${result.rc}    0").count(), 2);
    }

    #[test]
    fn robot_syntax_in_paths_is_escaped() {
        let case = RunnerCase::new("odd/a  b\t${x}.py", "../odd/a  b\t${x}.py");
        let text = render_runner("python3", &[case]);
        let line = "odd/a ${SPACE}b\\t\\${x}\n    ${result}=    Run Process    python3    \
                    ${CURDIR}/../odd/a ${SPACE}b\\t\\${x}.py    cwd=${CURDIR}\n";
        assert!(text.contains(line), "{text}");
    }

    #[test]
    fn escape_cell_cases() {
        assert_eq!(escape_cell("plain/name"), "plain/name");
        assert_eq!(escape_cell("one space"), "one space");
        assert_eq!(escape_cell("a   b"), "a ${SPACE}${SPACE}b");
        assert_eq!(escape_cell(" lead "), "${SPACE}lead${SPACE}");
        assert_eq!(escape_cell(r"win\path"), r"win\\path");
        assert_eq!(escape_cell("@{list}&{d}%{env}"), r"\@{list}\&{d}\%{env}");
        assert_eq!(escape_cell("#notes"), r"\#notes");
        assert_eq!(escape_cell("k=v"), r"k\=v");
        assert_eq!(escape_cell("$5 costs"), "$5 costs");
    }
}
