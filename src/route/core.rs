use http::Method;
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use std::borrow::Cow;

use super::constraints::{Constraints, DIGITS, SLUG, WORDS};
use crate::error::{Result, RouterError};
use crate::params::RouteParams;

/// Matches `{name}` placeholders in a path template.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder regex is valid")
});

/// Patterns derived from the template and constraints, built on first use.
#[derive(Debug, Clone)]
struct CompiledRoute {
    /// Anchored matcher with one named group per constrained placeholder.
    matcher: Regex,
    /// Whole-string validators, index-aligned with the route's constraints.
    validators: Vec<Regex>,
}

/// One named, method-specific binding from a path template to a handler reference.
///
/// A route without constraints is matched as a literal string. Once constraints are
/// present, every constrained `{name}` placeholder becomes a named capture group,
/// and the same fragments validate arguments during generation, so a generated
/// path always matches its own route.
#[derive(Debug, Clone)]
pub struct Route {
    key: String,
    method: Method,
    path: String,
    handler: String,
    constraints: Option<Constraints>,
    defaults: RouteParams,
    compiled: OnceCell<CompiledRoute>,
}

impl Route {
    /// Build a route. The path loses its trailing `/` unless it is exactly `/`.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidRoute`] when the key, path or handler reference is
    /// empty, or the method is not a standard HTTP verb.
    pub fn new(
        key: impl Into<String>,
        method: &str,
        path: &str,
        handler: impl Into<String>,
        constraints: Option<Constraints>,
    ) -> Result<Self> {
        let key = key.into();
        let handler = handler.into();
        let invalid = |reason: &str| RouterError::InvalidRoute {
            key: key.clone(),
            reason: reason.to_string(),
        };

        if key.is_empty() {
            return Err(invalid("key must not be empty"));
        }
        if path.is_empty() {
            return Err(invalid("path must not be empty"));
        }
        if handler.is_empty() {
            return Err(invalid("handler reference must not be empty"));
        }
        let method =
            parse_method(method).ok_or_else(|| invalid("method is not a standard HTTP verb"))?;

        Ok(Self {
            path: normalize_path(path).into_owned(),
            key,
            method,
            handler,
            constraints,
            defaults: RouteParams::new(),
            compiled: OnceCell::new(),
        })
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Normalized path template.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn handler(&self) -> &str {
        &self.handler
    }

    #[must_use]
    pub fn constraints(&self) -> Option<&Constraints> {
        self.constraints.as_ref()
    }

    #[must_use]
    pub fn defaults(&self) -> &RouteParams {
        &self.defaults
    }

    /// Split the handler reference at its last `@` into `(target, action)`.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidHandlerRef`] when there is no `@` or either side is empty.
    pub fn handler_parts(&self) -> Result<(&str, &str)> {
        match self.handler.rsplit_once('@') {
            Some((target, action)) if !target.is_empty() && !action.is_empty() => {
                Ok((target, action))
            }
            _ => Err(RouterError::InvalidHandlerRef {
                handler: self.handler.clone(),
            }),
        }
    }

    /// Placeholder names in template order.
    #[must_use]
    pub fn placeholders(&self) -> Vec<&str> {
        PLACEHOLDER
            .captures_iter(&self.path)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    }

    pub fn where_digits(&mut self, name: &str) -> &mut Self {
        self.where_pattern(name, DIGITS)
    }

    pub fn where_words(&mut self, name: &str) -> &mut Self {
        self.where_pattern(name, WORDS)
    }

    pub fn where_slug(&mut self, name: &str) -> &mut Self {
        self.where_pattern(name, SLUG)
    }

    /// Restrict `name` to an arbitrary regex fragment.
    pub fn where_pattern(&mut self, name: &str, fragment: &str) -> &mut Self {
        self.constraints
            .get_or_insert_with(Constraints::new)
            .insert(name, fragment);
        self.compiled = OnceCell::new();
        self
    }

    /// Default used when a parameter is absent from the captures or generation arguments.
    pub fn set_default(&mut self, name: &str, value: impl ToString) -> &mut Self {
        self.defaults.insert(name, value);
        self
    }

    /// The anchored matcher for this route.
    ///
    /// Without constraints this is the escaped literal path.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] when a fragment does not compile.
    pub fn compiled_pattern(&self) -> Result<&Regex> {
        Ok(&self.compiled()?.matcher)
    }

    fn compiled(&self) -> Result<&CompiledRoute> {
        self.compiled.get_or_try_init(|| self.compile())
    }

    fn compile(&self) -> Result<CompiledRoute> {
        let empty = Constraints::new();
        let constraints = self.constraints.as_ref().unwrap_or(&empty);

        let mut pattern = String::with_capacity(self.path.len() + 16);
        pattern.push('^');
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(&self.path) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            // Unconstrained placeholders stay literal text.
            let Some(fragment) = constraints.get(name.as_str()) else {
                continue;
            };
            pattern.push_str(&regex::escape(&self.path[last..whole.start()]));
            pattern.push_str("(?P<");
            pattern.push_str(name.as_str());
            pattern.push('>');
            pattern.push_str(&non_capturing(fragment));
            pattern.push(')');
            last = whole.end();
        }
        pattern.push_str(&regex::escape(&self.path[last..]));
        pattern.push('$');

        let matcher = Regex::new(&pattern).map_err(|e| self.invalid_pattern(&e))?;
        let validators = constraints
            .iter()
            .map(|(_, fragment)| {
                Regex::new(&format!("^(?:{fragment})$")).map_err(|e| self.invalid_pattern(&e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(CompiledRoute {
            matcher,
            validators,
        })
    }

    fn invalid_pattern(&self, err: &regex::Error) -> RouterError {
        RouterError::InvalidPattern {
            key: self.key.clone(),
            reason: err.to_string(),
        }
    }

    /// Match an effective request path against this route.
    ///
    /// Returns the named captures (percent-decoded) with declared defaults filled
    /// in for absent names; a literal route yields its defaults only.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidPattern`] when the route's pattern does not compile.
    pub fn match_path(&self, path: &str) -> Result<Option<RouteParams>> {
        if self.constraints.is_none() {
            return Ok((self.path == path).then(|| self.defaults.clone()));
        }

        let matcher = self.compiled_pattern()?;
        let Some(caps) = matcher.captures(path) else {
            return Ok(None);
        };

        let mut params = RouteParams::new();
        for name in self.placeholders() {
            if let Some(value) = caps.name(name) {
                let raw = value.as_str();
                let decoded = urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw));
                params.insert(name, decoded);
            }
        }
        for (name, value) in self.defaults.iter() {
            params.insert_missing(name, value);
        }
        Ok(Some(params))
    }

    /// Fill the template from `args`.
    ///
    /// Constrained placeholders take the argument or, failing that, the route default.
    /// With `strict`, a placeholder with neither is [`RouterError::MissingArgument`];
    /// otherwise it is left in place. Every substituted value must satisfy its
    /// constraint as a whole-string match.
    ///
    /// # Errors
    ///
    /// [`RouterError::MissingArgument`], [`RouterError::ArgumentConstraintViolation`]
    /// or [`RouterError::InvalidPattern`].
    pub fn generate_path(&self, args: &RouteParams, strict: bool) -> Result<String> {
        let Some(constraints) = &self.constraints else {
            return Ok(self.path.clone());
        };
        let compiled = self.compiled()?;
        let present = self.placeholders();

        let mut resolved = RouteParams::new();
        for ((name, fragment), validator) in constraints.iter().zip(&compiled.validators) {
            if !present.contains(&name) {
                continue;
            }
            let value = match args.get(name).or_else(|| self.defaults.get(name)) {
                Some(value) => value,
                None if strict => {
                    return Err(RouterError::MissingArgument {
                        parameter: name.to_string(),
                        path: self.path.clone(),
                    })
                }
                None => continue,
            };
            if !validator.is_match(value) {
                return Err(RouterError::ArgumentConstraintViolation {
                    parameter: name.to_string(),
                    pattern: fragment.to_string(),
                    path: self.path.clone(),
                });
            }
            resolved.insert(name, value);
        }

        let generated = PLACEHOLDER.replace_all(&self.path, |caps: &regex::Captures<'_>| {
            let name = caps.get(1).map_or("", |m| m.as_str());
            match resolved.get(name) {
                Some(value) => value.to_string(),
                None => caps.get(0).map_or("", |m| m.as_str()).to_string(),
            }
        });
        Ok(generated.into_owned())
    }
}

/// Strip trailing slashes; the root path stays `/`.
pub(crate) fn normalize_path(path: &str) -> Cow<'_, str> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        Cow::Borrowed("/")
    } else if trimmed.len() == path.len() {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(trimmed.to_string())
    }
}

/// Standard HTTP verbs a route may be registered for. Extension methods are rejected
/// so a misspelled verb fails at registration instead of producing an unreachable route.
const METHODS: [Method; 9] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
    Method::CONNECT,
    Method::TRACE,
];

fn parse_method(method: &str) -> Option<Method> {
    METHODS
        .iter()
        .find(|m| m.as_str().eq_ignore_ascii_case(method.trim()))
        .cloned()
}

/// Rewrite capturing groups in a constraint fragment to `(?:` so the only captures in
/// a route pattern are the named parameter groups. Plain `(` and named groups
/// (`(?P<name>`, `(?<name>`) are both rewritten; other `(?` forms are kept.
pub(crate) fn non_capturing(fragment: &str) -> Cow<'_, str> {
    if !fragment.contains('(') {
        return Cow::Borrowed(fragment);
    }

    let mut out = String::with_capacity(fragment.len() + 8);
    let mut chars = fragment.char_indices().peekable();
    let mut in_class = false;
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some((_, escaped)) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '(' if !in_class => {
                let rest = &fragment[i + 1..];
                if let Some(len) = named_group_prefix(rest) {
                    out.push_str("(?:");
                    let skip_to = i + 1 + len;
                    while chars.next_if(|&(j, _)| j < skip_to).is_some() {}
                } else if rest.starts_with('?') {
                    out.push(c);
                } else {
                    out.push_str("(?:");
                }
            }
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Byte length of a `?P<name>` or `?<name>` group opener, if `rest` starts with one.
fn named_group_prefix(rest: &str) -> Option<usize> {
    let after = rest
        .strip_prefix("?P<")
        .or_else(|| rest.strip_prefix("?<"))
        .filter(|r| !r.starts_with('=') && !r.starts_with('!'))?;
    let close = after.find('>')?;
    Some(rest.len() - after.len() + close + 1)
}
