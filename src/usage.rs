//! Help text for declared parameters.
//!
//! Lists every parameter of a config object with its description, value type
//! and default, followed by the parameters of each nested object under their
//! dotted prefix. Short names are only shown for the root object because they
//! are only resolvable there on the command line.

use std::fmt::Write;

use crate::{
    binder::Params,
    schema::{ParamKind, ParameterSchema},
};

/// ANSI escape codes for terminal output.
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Whether help text carries terminal colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    /// Plain text
    #[default]
    Plain,
    /// ANSI colors for a terminal
    Ansi,
}

impl Style {
    fn header(self, text: &str) -> String {
        match self {
            Style::Plain => text.to_string(),
            Style::Ansi => format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET),
        }
    }

    fn name(self, text: &str) -> String {
        match self {
            Style::Plain => text.to_string(),
            Style::Ansi => format!("{}{}{}{}", Colors::BOLD, Colors::GREEN, text, Colors::RESET),
        }
    }

    fn details(self, text: &str) -> String {
        match self {
            Style::Plain => text.to_string(),
            Style::Ansi => format!("{}{}{}", Colors::DIM, text, Colors::RESET),
        }
    }
}

/// Renders the options listing of `params` as plain text.
pub fn render(params: &Params<'_>) -> String {
    render_styled(params, Style::Plain)
}

/// Renders the options listing of `params`.
pub fn render_styled(params: &Params<'_>, style: Style) -> String {
    let registry = params.registry();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        style.header(&format!(
            "Options for {} -- {}:",
            registry.type_name(),
            registry.description()
        ))
    );
    render_object(&mut out, params, "", style);

    out
}

fn sort_key(param: &ParameterSchema) -> (char, &str) {
    let first = param
        .short_name
        .or_else(|| param.name.chars().next())
        .unwrap_or_default();
    (first, param.name.as_str())
}

fn render_object(out: &mut String, params: &Params<'_>, prefix: &str, style: Style) {
    let registry = params.registry();

    let (mut nested, mut group): (Vec<_>, Vec<_>) = registry
        .iter()
        .partition(|p| matches!(p.kind, ParamKind::Nested(_)));
    group.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    nested.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));

    let show_short = prefix.is_empty();
    let label = |param: &ParameterSchema| {
        let long = format!("--{prefix}{}", param.name);
        match param.short_name {
            Some(short) if show_short => format!("-{short}, {long}"),
            _ => long,
        }
    };

    let width = group
        .iter()
        .map(|&p| label(p).chars().count())
        .max()
        .unwrap_or(0);

    for &param in &group {
        let name = label(param);
        let padding = " ".repeat(width - name.chars().count() + 2);
        let (value_type, default) = match params.adapter(&param.name) {
            Some(adapter) => (adapter.value_type(), adapter.default_display()),
            None => (param.kind.label(), String::new()),
        };

        let _ = writeln!(
            out,
            "  {}{padding}{} {}",
            style.name(&name),
            param.description,
            style.details(&format!("({value_type}, default: {default})"))
        );
    }
    out.push('\n');

    for param in nested {
        let Some(child) = params.child(&param.name) else {
            continue;
        };
        let child_registry = child.registry();
        let path = format!("{prefix}{}", param.name);

        let _ = writeln!(
            out,
            "{}",
            style.header(&format!(
                "Options for {path} -- {} ({} -- {})",
                param.description,
                child_registry.type_name(),
                child_registry.description()
            ))
        );
        render_object(out, child, &format!("{path}."), style);
    }
}
