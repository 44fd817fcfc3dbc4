//! Styled terminal output for `extsecret-ctl`.
//!
//! Uses `anstyle` for ANSI style definitions and `anstream` for auto-detecting
//! terminal capabilities. Output degrades to plain text when piped, so
//! `preview` output can be redirected straight into a file.

mod styles;

use std::fmt::Display;
use std::io::Write;

use anstyle::Style;

pub(crate) use styles::clap_styles;

use styles::{DIM, ERROR, HEADER, HINT, LABEL, SUCCESS, WARNING};

enum Stream {
    Out,
    Err,
}

fn styled_line(stream: Stream, style: Style, msg: impl Display) {
    match stream {
        Stream::Out => {
            let mut out = anstream::stdout().lock();
            writeln!(out, "{style}{msg}{style:#}").ok();
        }
        Stream::Err => {
            let mut out = anstream::stderr().lock();
            writeln!(out, "{style}{msg}{style:#}").ok();
        }
    }
}

/// Green line with a checkmark.
pub(crate) fn success(msg: impl Display) {
    styled_line(Stream::Out, SUCCESS, format_args!("✓ {msg}"));
}

/// Red line with an X, on stderr.
pub(crate) fn error(msg: impl Display) {
    styled_line(Stream::Err, ERROR, format_args!("✗ {msg}"));
}

pub(crate) fn warning(msg: impl Display) {
    styled_line(Stream::Out, WARNING, format_args!("! {msg}"));
}

pub(crate) fn header(msg: impl Display) {
    styled_line(Stream::Out, HEADER, msg);
}

/// "  Label: value" with the label bolded.
pub(crate) fn label(name: impl Display, value: impl Display) {
    let mut out = anstream::stdout().lock();
    writeln!(out, "  {LABEL}{name}:{LABEL:#} {value}").ok();
}

pub(crate) fn dim(msg: impl Display) {
    styled_line(Stream::Out, DIM, msg);
}

pub(crate) fn hint(msg: impl Display) {
    styled_line(Stream::Out, HINT, msg);
}

/// Bulleted list entry.
pub(crate) fn item(msg: impl Display) {
    styled_line(Stream::Out, Style::new(), format_args!("  • {msg}"));
}

pub(crate) fn blank() {
    styled_line(Stream::Out, Style::new(), "");
}

pub(crate) fn plain(msg: impl Display) {
    styled_line(Stream::Out, Style::new(), msg);
}

/// Write `text` to stdout exactly as given, without a trailing newline.
pub(crate) fn raw(text: &str) {
    let mut out = anstream::stdout().lock();
    write!(out, "{text}").ok();
    out.flush().ok();
}
