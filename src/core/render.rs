//! Positional brace-template rendering
//!
//! Templates use the `format!` placeholder grammar restricted to the
//! positional form: each `{}` consumes the next captured argument, and
//! `{{` / `}}` emit literal braces. Anything else between braces, too
//! few arguments, or leftover arguments is a render error; the caller
//! substitutes the sentinel line and carries on.

use super::error::{LoggerError, Result};
use super::record::ArgValue;

pub(crate) fn render_template(template: &str, args: &[ArgValue]) -> Result<String> {
    let mut out = String::with_capacity(template.len() + 16 * args.len());
    let mut next_arg = 0usize;
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => match chars.peek() {
                Some('{') => {
                    chars.next();
                    out.push('{');
                }
                Some('}') => {
                    chars.next();
                    let arg = args.get(next_arg).ok_or_else(|| {
                        LoggerError::render_mismatch(
                            template,
                            count_placeholders(template),
                            args.len(),
                        )
                    })?;
                    out.push_str(&arg.to_string());
                    next_arg += 1;
                }
                _ => return Err(LoggerError::render_directive(template)),
            },
            '}' => match chars.peek() {
                Some('}') => {
                    chars.next();
                    out.push('}');
                }
                _ => return Err(LoggerError::render_directive(template)),
            },
            _ => out.push(ch),
        }
    }

    if next_arg != args.len() {
        return Err(LoggerError::render_mismatch(template, next_arg, args.len()));
    }

    Ok(out)
}

/// Count `{}` placeholders, honoring `{{` escapes. Used only to report
/// an accurate mismatch error.
fn count_placeholders(template: &str) -> usize {
    let mut count = 0;
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '{' {
            match chars.peek() {
                Some('{') => {
                    chars.next();
                }
                Some('}') => {
                    chars.next();
                    count += 1;
                }
                _ => {}
            }
        } else if ch == '}' && chars.peek() == Some(&'}') {
            chars.next();
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_placeholders() {
        assert_eq!(render_template("plain text", &[]).unwrap(), "plain text");
    }

    #[test]
    fn test_positional_substitution() {
        let rendered = render_template(
            "LOGGING {} {} {}",
            &[
                ArgValue::from("BENCHMARK"),
                ArgValue::from(1),
                ArgValue::from(42.42),
            ],
        )
        .unwrap();
        assert_eq!(rendered, "LOGGING BENCHMARK 1 42.42");
    }

    #[test]
    fn test_matches_eager_format() {
        let rendered = render_template(
            "{} consumed {} of {} buffers",
            &[
                ArgValue::from("worker-3"),
                ArgValue::from(17u32),
                ArgValue::from(64u32),
            ],
        )
        .unwrap();
        assert_eq!(
            rendered,
            format!("{} consumed {} of {} buffers", "worker-3", 17u32, 64u32)
        );
    }

    #[test]
    fn test_escaped_braces() {
        let rendered = render_template("set {{{}}}", &[ArgValue::from("x")]).unwrap();
        assert_eq!(rendered, format!("set {{{}}}", "x"));
        assert_eq!(render_template("{{}}", &[]).unwrap(), "{}");
    }

    #[test]
    fn test_too_few_args() {
        let err = render_template("{} {}", &[ArgValue::from(1)]).unwrap_err();
        assert!(matches!(
            err,
            LoggerError::RenderMismatch {
                placeholders: 2,
                args: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_leftover_args() {
        let err =
            render_template("{}", &[ArgValue::from(1), ArgValue::from(2)]).unwrap_err();
        assert!(matches!(err, LoggerError::RenderMismatch { .. }));
    }

    #[test]
    fn test_unsupported_directive() {
        let err = render_template("{:x}", &[ArgValue::from(255)]).unwrap_err();
        assert!(matches!(err, LoggerError::RenderDirective { .. }));

        let err = render_template("{0}", &[ArgValue::from(1)]).unwrap_err();
        assert!(matches!(err, LoggerError::RenderDirective { .. }));
    }

    #[test]
    fn test_stray_close_brace() {
        assert!(render_template("oops }", &[]).is_err());
    }

    #[test]
    fn test_count_placeholders() {
        assert_eq!(count_placeholders(""), 0);
        assert_eq!(count_placeholders("{} {} {}"), 3);
        assert_eq!(count_placeholders("{{}} {}"), 1);
    }
}
