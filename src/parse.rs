//! Parse pest pairs into AST nodes

use chrono::NaiveDate;
use miette::SourceSpan;
use pest::Parser;
use pest::iterators::Pair;

use crate::ast::*;
use crate::errors::{ParseError, SourceContext};
use crate::{GanttParser, Rule};

/// Parse chart source into AST, reporting errors against `<input>`.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    parse_named("<input>", source)
}

/// Parse chart source into AST, naming the source in diagnostics.
pub fn parse_named(name: &str, source: &str) -> Result<Program, ParseError> {
    let ctx = SourceContext::new(name, source);
    let pairs =
        GanttParser::parse(Rule::program, source).map_err(|e| ParseError::from_pest(e, &ctx))?;

    let mut statements = Vec::new();
    for pair in pairs {
        if pair.as_rule() == Rule::program {
            for inner in pair.into_inner() {
                if inner.as_rule() == Rule::statement {
                    statements.push(parse_statement(inner, &ctx)?);
                }
            }
        }
    }

    crate::log::debug!(statements = statements.len(), "parsed chart source");
    Ok(Program { statements })
}

pub(crate) fn span_of(pair: &Pair<Rule>) -> SourceSpan {
    let span = pair.as_span();
    (span.start(), span.end() - span.start()).into()
}

fn syntax(message: &str, span: SourceSpan, ctx: &SourceContext) -> ParseError {
    ParseError::Syntax {
        message: message.to_string(),
        src: ctx.named_source(),
        span,
    }
}

fn unexpected(pair: &Pair<Rule>, ctx: &SourceContext) -> ParseError {
    syntax(
        &format!("unexpected {:?}", pair.as_rule()),
        span_of(pair),
        ctx,
    )
}

fn parse_statement(pair: Pair<Rule>, ctx: &SourceContext) -> Result<Statement, ParseError> {
    let span = span_of(&pair);
    let Some(inner) = pair.into_inner().next() else {
        return Err(syntax("empty statement", span, ctx));
    };
    let kind = match inner.as_rule() {
        Rule::task_stmt => StatementKind::Task(parse_task(inner, ctx)?),
        Rule::dependency => StatementKind::Dependency(parse_dependency(inner, ctx)?),
        Rule::setting => StatementKind::Setting(parse_setting(inner, ctx)?),
        Rule::scroll_stmt => StatementKind::Scroll(parse_scroll(inner, ctx)?),
        _ => return Err(unexpected(&inner, ctx)),
    };
    Ok(Statement { kind, span })
}

fn parse_task(pair: Pair<Rule>, ctx: &SourceContext) -> Result<TaskDecl, ParseError> {
    let span = span_of(&pair);
    let mut name = None;
    let mut dates = Vec::with_capacity(2);
    let mut row = None;
    let mut progress = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::kw_task => {}
            Rule::name => name = Some(parse_name(&inner)),
            Rule::date => dates.push(parse_date(&inner, ctx)?),
            Rule::row_attr => {
                let value = inner
                    .into_inner()
                    .next()
                    .ok_or_else(|| syntax("missing row number", span, ctx))?;
                row = Some(parse_integer(&value, ctx)?);
            }
            Rule::progress_attr => progress = Some(parse_progress(inner, ctx)?),
            _ => return Err(unexpected(&inner, ctx)),
        }
    }

    match (name, dates.as_slice()) {
        (Some(name), &[start, end]) => Ok(TaskDecl {
            name,
            start,
            end,
            row,
            progress,
        }),
        _ => Err(syntax("incomplete task", span, ctx)),
    }
}

fn parse_progress(pair: Pair<Rule>, ctx: &SourceContext) -> Result<f64, ParseError> {
    let span = span_of(&pair);
    let mut value = None;
    let mut percent = false;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::number => value = Some(parse_number(&inner, ctx)?),
            Rule::percent => percent = true,
            _ => return Err(unexpected(&inner, ctx)),
        }
    }
    let value = value.ok_or_else(|| syntax("missing progress value", span, ctx))?;
    Ok(if percent { value / 100.0 } else { value })
}

fn parse_dependency(pair: Pair<Rule>, ctx: &SourceContext) -> Result<DependencyDecl, ParseError> {
    let span = span_of(&pair);
    let mut names = pair.into_inner().map(|p| parse_name(&p));
    match (names.next(), names.next()) {
        (Some(source), Some(target)) => Ok(DependencyDecl { source, target }),
        _ => Err(syntax("dependency needs two task names", span, ctx)),
    }
}

fn parse_setting(pair: Pair<Rule>, ctx: &SourceContext) -> Result<Setting, ParseError> {
    let span = span_of(&pair);
    let mut inner = pair.into_inner();
    match (inner.next(), inner.next()) {
        (Some(name), Some(value)) => Ok(Setting {
            name: name.as_str().to_string(),
            value: parse_number(&value, ctx)?,
            value_span: span_of(&value),
        }),
        _ => Err(syntax("setting needs a name and a value", span, ctx)),
    }
}

fn parse_scroll(pair: Pair<Rule>, ctx: &SourceContext) -> Result<Scroll, ParseError> {
    let span = span_of(&pair);
    for inner in pair.into_inner() {
        let rule = inner.as_rule();
        if rule == Rule::kw_scroll {
            continue;
        }
        let value = inner
            .into_inner()
            .next()
            .ok_or_else(|| syntax("missing scroll position", span, ctx))?;
        return match rule {
            Rule::scroll_x => Ok(Scroll::X(parse_date(&value, ctx)?)),
            Rule::scroll_y => Ok(Scroll::Y(parse_integer(&value, ctx)?)),
            _ => Err(unexpected(&value, ctx)),
        };
    }
    Err(syntax("missing scroll axis", span, ctx))
}

/// Name text, with the quotes of a quoted name removed.
fn parse_name(pair: &Pair<Rule>) -> String {
    let text = pair.as_str();
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
        .to_string()
}

fn parse_date(pair: &Pair<Rule>, ctx: &SourceContext) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(pair.as_str(), "%Y-%m-%d").map_err(|_| ParseError::InvalidDate {
        text: pair.as_str().to_string(),
        src: ctx.named_source(),
        span: span_of(pair),
    })
}

fn parse_number(pair: &Pair<Rule>, ctx: &SourceContext) -> Result<f64, ParseError> {
    pair.as_str()
        .parse()
        .map_err(|_| invalid_number(pair, ctx))
}

fn parse_integer(pair: &Pair<Rule>, ctx: &SourceContext) -> Result<u32, ParseError> {
    pair.as_str()
        .parse()
        .map_err(|_| invalid_number(pair, ctx))
}

fn invalid_number(pair: &Pair<Rule>, ctx: &SourceContext) -> ParseError {
    ParseError::InvalidNumber {
        text: pair.as_str().to_string(),
        src: ctx.named_source(),
        span: span_of(pair),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn kinds(source: &str) -> Vec<StatementKind> {
        parse(source)
            .unwrap()
            .statements
            .into_iter()
            .map(|s| s.kind)
            .collect()
    }

    #[test]
    fn parses_every_statement_kind() {
        let source = r#"
# build plan
clearance = 0.25
task "Task A" from 2024-11-07 to 2024-11-12 progress 60%
task B from 2024-11-03 to 2024-11-10 row 4 progress 0.3
B -> "Task A"   # B feeds A
scroll x 2024-11-02
scroll y 1
"#;
        assert_eq!(
            kinds(source),
            vec![
                StatementKind::Setting(Setting {
                    name: "clearance".into(),
                    value: 0.25,
                    value_span: (26, 4).into(),
                }),
                StatementKind::Task(TaskDecl {
                    name: "Task A".into(),
                    start: date(2024, 11, 7),
                    end: date(2024, 11, 12),
                    row: None,
                    progress: Some(0.6),
                }),
                StatementKind::Task(TaskDecl {
                    name: "B".into(),
                    start: date(2024, 11, 3),
                    end: date(2024, 11, 10),
                    row: Some(4),
                    progress: Some(0.3),
                }),
                StatementKind::Dependency(DependencyDecl {
                    source: "B".into(),
                    target: "Task A".into(),
                }),
                StatementKind::Scroll(Scroll::X(date(2024, 11, 2))),
                StatementKind::Scroll(Scroll::Y(1)),
            ]
        );
    }

    #[test]
    fn statement_span_covers_the_line() {
        let source = "A -> B\n  task C from 2024-01-01 to 2024-01-02\n";
        let program = parse(source).unwrap();
        assert_eq!(program.statements[0].span, SourceSpan::from((0, 6)));
        let second = program.statements[1].span;
        assert_eq!(second.offset(), 9);
        assert_eq!(
            &source[second.offset()..second.offset() + second.len()],
            "task C from 2024-01-01 to 2024-01-02"
        );
    }

    #[test]
    fn empty_and_comment_only_sources() {
        assert!(kinds("").is_empty());
        assert!(kinds("# nothing here\n\n# still nothing").is_empty());
    }

    #[test]
    fn task_keyword_needs_a_boundary() {
        assert!(parse("taskA from 2024-01-01 to 2024-01-02").is_err());
        assert_eq!(
            kinds("tasks -> scrolling"),
            vec![StatementKind::Dependency(DependencyDecl {
                source: "tasks".into(),
                target: "scrolling".into(),
            })]
        );
    }

    #[test]
    fn invalid_calendar_date() {
        let err = parse("task A from 2024-02-30 to 2024-03-01").unwrap_err();
        match err {
            ParseError::InvalidDate { text, span, .. } => {
                assert_eq!(text, "2024-02-30");
                assert_eq!(span, SourceSpan::from((12, 10)));
            }
            other => panic!("expected an invalid date, got {other:?}"),
        }
    }

    #[test]
    fn syntax_error_points_into_source() {
        let err = parse("task A from 2024-01-01\n").unwrap_err();
        let ParseError::Syntax { span, .. } = err else {
            panic!("expected a syntax error");
        };
        assert!(span.offset() >= 22, "span {span:?} should follow the date");
    }

    #[test]
    fn row_number_overflow() {
        let err = parse("task A from 2024-01-01 to 2024-01-02 row 99999999999").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { .. }));
    }
}
