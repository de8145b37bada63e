//! printf-style template substitution.
//!
//! The strand is the template. Positional placeholders (`%s`, `%d`,
//! `%05.2f`, `%2$s`) draw from the argument list; named placeholders
//! (`%:key`) draw from a separate map. A missing positional argument is an
//! error; an unresolved named placeholder is left verbatim in the output,
//! so templates can be filled in stages.

use crate::error::{Error, Result};
use crate::strand::Strand;

/// A scalar argument for [`Strand::format`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    /// Textual argument, for `%s`.
    Str(String),
    /// Integer argument, for `%d`/`%x`.
    Int(i64),
    /// Float argument, for `%f`.
    Float(f64),
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FormatArg {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl FormatArg {
    fn as_text(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Float(x) => x.to_string(),
        }
    }

    fn as_int(&self) -> Result<i64> {
        match self {
            Self::Int(n) => Ok(*n),
            Self::Float(x) => Ok(*x as i64),
            Self::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| Error::invalid_argument(format!("{s:?} is not an integer"))),
        }
    }

    fn as_float(&self) -> Result<f64> {
        match self {
            Self::Float(x) => Ok(*x),
            Self::Int(n) => Ok(*n as f64),
            Self::Str(s) => s
                .trim()
                .parse()
                .map_err(|_| Error::invalid_argument(format!("{s:?} is not a number"))),
        }
    }
}

// A parsed `%...` conversion.
struct Conversion {
    position: Option<usize>,
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
    kind: char,
}

impl Strand {
    /// Substitutes positional placeholders from `args`.
    ///
    /// Fails with [`Error::InvalidArgument`] when a placeholder has no
    /// argument or an argument cannot be rendered in the requested style.
    ///
    /// ```
    /// use strand::{FormatArg, Strand};
    ///
    /// let t = Strand::from("%s is %d years old");
    /// let out = t.format(&["Ana".into(), 7.into()]).unwrap();
    /// assert_eq!(out, "Ana is 7 years old");
    ///
    /// // Explicit positions may reorder and reuse arguments.
    /// let t = Strand::from("%2$s %1$s %2$s");
    /// assert_eq!(t.format(&["a".into(), "b".into()]).unwrap(), "b a b");
    /// ```
    pub fn format(&self, args: &[FormatArg]) -> Result<Self> {
        self.format_named(args, &[])
    }

    /// Substitutes positional placeholders from `args` and `%:key`
    /// placeholders from `named`.
    ///
    /// A named placeholder with no matching key is left verbatim.
    ///
    /// ```
    /// use strand::Strand;
    ///
    /// let t = Strand::from("Hello %:name, %:missing");
    /// let out = t.format_named(&[], &[("name", "world")]).unwrap();
    /// assert_eq!(out, "Hello world, %:missing");
    /// ```
    pub fn format_named(&self, args: &[FormatArg], named: &[(&str, &str)]) -> Result<Self> {
        let mut out = String::with_capacity(self.byte_len());
        let mut chars = self.as_str().chars().peekable();
        let mut next_positional = 0usize;
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.peek() {
                Some('%') => {
                    chars.next();
                    out.push('%');
                }
                Some(':') => {
                    chars.next();
                    let mut key = String::new();
                    while let Some(&k) = chars.peek() {
                        if k.is_ascii_alphanumeric() || k == '_' {
                            key.push(k);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    match named.iter().find(|(name, _)| *name == key) {
                        Some((_, value)) => out.push_str(value),
                        // Unresolved names stay verbatim by contract.
                        None => {
                            out.push_str("%:");
                            out.push_str(&key);
                        }
                    }
                }
                _ => {
                    let conv = parse_conversion(&mut chars)?;
                    let index = match conv.position {
                        Some(p) => p,
                        None => {
                            let i = next_positional;
                            next_positional += 1;
                            i
                        }
                    };
                    let arg = args.get(index).ok_or_else(|| {
                        Error::invalid_argument(format!(
                            "placeholder needs argument {} but only {} given",
                            index + 1,
                            args.len()
                        ))
                    })?;
                    render(&mut out, &conv, arg)?;
                }
            }
        }
        Ok(self.derive(out))
    }
}

fn parse_conversion(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<Conversion> {
    let mut digits = String::new();
    let mut position = None;
    let mut zero_pad = false;
    let mut width = 0usize;
    let mut precision = None;

    // Leading digits are a width unless followed by `$`, making them an
    // explicit 1-based position.
    loop {
        match chars.peek() {
            Some(&d) if d.is_ascii_digit() => {
                digits.push(d);
                chars.next();
            }
            Some('$') if !digits.is_empty() => {
                chars.next();
                let p: usize = digits
                    .parse()
                    .map_err(|_| Error::invalid_argument("position overflow"))?;
                if p == 0 {
                    return Err(Error::invalid_argument("positions are 1-based"));
                }
                position = Some(p - 1);
                digits.clear();
            }
            _ => break,
        }
    }
    if let Some(stripped) = digits.strip_prefix('0') {
        zero_pad = true;
        digits = stripped.to_owned();
    }
    if !digits.is_empty() {
        width = digits
            .parse()
            .map_err(|_| Error::invalid_argument("width overflow"))?;
    }
    if chars.peek() == Some(&'.') {
        chars.next();
        let mut prec = String::new();
        while let Some(&d) = chars.peek() {
            if d.is_ascii_digit() {
                prec.push(d);
                chars.next();
            } else {
                break;
            }
        }
        precision = Some(
            prec.parse()
                .map_err(|_| Error::invalid_argument("missing precision digits"))?,
        );
    }
    let kind = chars
        .next()
        .ok_or_else(|| Error::invalid_argument("dangling % at end of template"))?;
    if !matches!(kind, 's' | 'd' | 'f' | 'x' | 'X') {
        return Err(Error::invalid_argument(format!(
            "unknown conversion %{kind}"
        )));
    }
    Ok(Conversion {
        position,
        zero_pad,
        width,
        precision,
        kind,
    })
}

fn render(out: &mut String, conv: &Conversion, arg: &FormatArg) -> Result<()> {
    let rendered = match conv.kind {
        's' => {
            let mut text = arg.as_text();
            if let Some(p) = conv.precision {
                text = text.chars().take(p).collect();
            }
            text
        }
        'd' => arg.as_int()?.to_string(),
        'f' => {
            let precision = conv.precision.unwrap_or(6);
            format!("{:.*}", precision, arg.as_float()?)
        }
        'x' => format!("{:x}", arg.as_int()?),
        'X' => format!("{:X}", arg.as_int()?),
        _ => unreachable!("parse_conversion validates the kind"),
    };
    let fill = conv.width.saturating_sub(rendered.chars().count());
    if fill > 0 {
        if conv.zero_pad && conv.kind != 's' {
            // Zero-fill goes between the sign and the digits.
            if let Some(rest) = rendered.strip_prefix('-') {
                out.push('-');
                out.push_str(&"0".repeat(fill));
                out.push_str(rest);
                return Ok(());
            }
            out.push_str(&"0".repeat(fill));
        } else {
            out.push_str(&" ".repeat(fill));
        }
    }
    out.push_str(&rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{FormatArg, Strand};

    fn t(template: &str) -> Strand {
        Strand::from(template)
    }

    #[test]
    fn positional_substitution() {
        let out = t("%s is %d years old").format(&["Ana".into(), 7.into()]).unwrap();
        assert_eq!(out, "Ana is 7 years old");
        assert_eq!(t("100%%").format(&[]).unwrap(), "100%");
    }

    #[test]
    fn explicit_positions_reorder_and_reuse() {
        let out = t("%2$s %1$s %2$s").format(&["a".into(), "b".into()]).unwrap();
        assert_eq!(out, "b a b");
        // Explicit positions do not advance the implicit cursor.
        let out = t("%2$s %s").format(&["first".into(), "second".into()]).unwrap();
        assert_eq!(out, "second first");
    }

    #[test]
    fn width_and_precision() {
        assert_eq!(t("%05d").format(&[42.into()]).unwrap(), "00042");
        assert_eq!(t("%05d").format(&[(-42).into()]).unwrap(), "-0042");
        assert_eq!(t("%5s|").format(&["ab".into()]).unwrap(), "   ab|");
        assert_eq!(t("%.2f").format(&[FormatArg::Float(3.14159)]).unwrap(), "3.14");
        assert_eq!(t("%.3s").format(&["abcdef".into()]).unwrap(), "abc");
        assert_eq!(t("%x/%X").format(&[255.into(), 255.into()]).unwrap(), "ff/FF");
    }

    #[test]
    fn named_placeholders() {
        let out = t("%:greeting %:name!")
            .format_named(&[], &[("greeting", "Hi"), ("name", "Bob")])
            .unwrap();
        assert_eq!(out, "Hi Bob!");
    }

    #[test]
    fn unresolved_names_stay_verbatim() {
        let out = t("keep %:unknown here").format_named(&[], &[]).unwrap();
        assert_eq!(out, "keep %:unknown here");
    }

    #[test]
    fn mixed_named_and_positional() {
        let out = t("%:name scored %d")
            .format_named(&[91.into()], &[("name", "Ana")])
            .unwrap();
        assert_eq!(out, "Ana scored 91");
    }

    #[test]
    fn errors() {
        assert!(t("%s %s").format(&["only".into()]).is_err());
        assert!(t("%q").format(&["x".into()]).is_err());
        assert!(t("%d").format(&["not a number".into()]).is_err());
        assert!(t("dangling %").format(&[]).is_err());
    }
}
