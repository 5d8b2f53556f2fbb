//! Decoding of the tagged-array AST encoding
//!
//! A node is a JSON array whose first element is its kind tag; the rest are
//! children. `null` marks an absent child. Raw strings and integers standing
//! where a node is expected pass through as literals.

use std::rc::Rc;

use serde_json::Value as Json;

use super::{ConstRef, Node, Param, ParamSpec};
use crate::error::AstError;

/// Decode one node from its JSON form.
pub fn decode(raw: &Json) -> Result<Node, AstError> {
    match raw {
        Json::Array(items) => decode_tagged(items),
        Json::String(s) => Ok(Node::StringLit(s.clone())),
        Json::Number(n) => n
            .as_i64()
            .map(Node::IntegerLit)
            .ok_or_else(|| AstError::malformed("integer-literal", format!("`{}` is not an i64", n))),
        other => Err(AstError::malformed(
            "node",
            format!("expected a tagged array, found `{}`", other),
        )),
    }
}

fn decode_tagged(items: &[Json]) -> Result<Node, AstError> {
    let Some((tag, children)) = items.split_first() else {
        return Err(AstError::malformed("node", "empty array"));
    };
    let kind = tag
        .as_str()
        .ok_or_else(|| AstError::malformed("node", format!("tag `{}` is not a string", tag)))?;

    match kind {
        "sequence" => Ok(Node::Sequence(decode_all(children)?)),

        "class-def" => {
            // The superclass slot may be omitted entirely.
            let (target, superclass, body) = match children {
                [target, body] => (target, None, body),
                [target, superclass, body] => (target, optional(superclass)?, body),
                _ => return Err(arity_error(kind, "2 or 3", children.len())),
            };
            Ok(Node::ClassDef {
                target: decode_const_target(target)?,
                superclass,
                body: Box::new(decode(body)?),
            })
        }

        "method-def" => {
            let [name, params, body] = exactly::<3>(kind, children)?;
            Ok(Node::MethodDef {
                name: name_at(kind, name)?,
                params: decode_params(params)?,
                body: Rc::new(decode(body)?),
            })
        }

        "local-assign" | "ivar-assign" => {
            let [name, value] = exactly::<2>(kind, children)?;
            let name = name_at(kind, name)?;
            let value = Box::new(decode(value)?);
            Ok(if kind == "local-assign" {
                Node::LocalAssign { name, value }
            } else {
                Node::IvarAssign { name, value }
            })
        }

        "ivar-read" => {
            let [name] = exactly::<1>(kind, children)?;
            Ok(Node::IvarRead(name_at(kind, name)?))
        }

        "local-read" => {
            let [name] = exactly::<1>(kind, children)?;
            Ok(Node::LocalRead(name_at(kind, name)?))
        }

        "send" => {
            let (receiver, rest) = children
                .split_first()
                .ok_or_else(|| arity_error(kind, "at least 2", 0))?;
            let (method, args) = rest
                .split_first()
                .ok_or_else(|| arity_error(kind, "at least 2", 1))?;
            Ok(Node::Send {
                receiver: optional(receiver)?,
                method: name_at(kind, method)?,
                args: decode_all(args)?,
            })
        }

        "const-ref" => Ok(Node::ConstRef(decode_const_ref(children)?)),

        "string-literal" => {
            let [raw] = exactly::<1>(kind, children)?;
            raw.as_str()
                .map(|s| Node::StringLit(s.to_string()))
                .ok_or_else(|| AstError::malformed(kind, "payload is not a string"))
        }

        "integer-literal" => {
            let [raw] = exactly::<1>(kind, children)?;
            raw.as_i64()
                .map(Node::IntegerLit)
                .ok_or_else(|| AstError::malformed(kind, "payload is not an i64"))
        }

        "interpolated-string" => Ok(Node::Interpolated(decode_all(children)?)),

        other => Err(AstError::UnhandledNodeKind {
            kind: other.to_string(),
        }),
    }
}

fn decode_all(children: &[Json]) -> Result<Vec<Node>, AstError> {
    children.iter().map(decode).collect()
}

fn optional(raw: &Json) -> Result<Option<Box<Node>>, AstError> {
    match raw {
        Json::Null => Ok(None),
        other => Ok(Some(Box::new(decode(other)?))),
    }
}

fn decode_const_ref(children: &[Json]) -> Result<ConstRef, AstError> {
    let [scope, name] = exactly::<2>("const-ref", children)?;
    Ok(ConstRef {
        scope: optional(scope)?,
        name: name_at("const-ref", name)?,
    })
}

/// A class-def target must itself be a `const-ref` node.
fn decode_const_target(raw: &Json) -> Result<ConstRef, AstError> {
    match decode(raw)? {
        Node::ConstRef(target) => Ok(target),
        other => Err(AstError::malformed(
            "class-def",
            format!("target must be a const-ref, found `{}`", other.kind_name()),
        )),
    }
}

fn decode_params(raw: &Json) -> Result<ParamSpec, AstError> {
    let items = raw
        .as_array()
        .ok_or_else(|| AstError::malformed("params", "expected an array"))?;
    let Some((tag, entries)) = items.split_first() else {
        return Err(AstError::malformed("params", "empty array"));
    };
    if tag.as_str() != Some("params") {
        return Err(AstError::malformed("params", format!("unexpected tag `{}`", tag)));
    }

    let params = entries
        .iter()
        .map(decode_param)
        .collect::<Result<Vec<_>, _>>()?;
    ParamSpec::new(params)
}

fn decode_param(raw: &Json) -> Result<Param, AstError> {
    let entry = raw
        .as_array()
        .ok_or_else(|| AstError::malformed("params", "entry is not an array"))?;
    match entry.as_slice() {
        [tag, name] => {
            let name = name_at("params", name)?;
            match tag.as_str() {
                Some("fixed") => Ok(Param::Fixed(name)),
                Some("rest") => Ok(Param::Rest(name)),
                _ => Err(AstError::malformed(
                    "params",
                    format!("unknown parameter kind `{}`", tag),
                )),
            }
        }
        _ => Err(AstError::malformed("params", "entry must be [kind, name]")),
    }
}

fn name_at(kind: &str, raw: &Json) -> Result<String, AstError> {
    raw.as_str()
        .map(str::to_string)
        .ok_or_else(|| AstError::malformed(kind, format!("expected a name, found `{}`", raw)))
}

fn exactly<'a, const N: usize>(kind: &str, children: &'a [Json]) -> Result<&'a [Json; N], AstError> {
    children
        .try_into()
        .map_err(|_| arity_error(kind, &N.to_string(), children.len()))
}

fn arity_error(kind: &str, expected: &str, got: usize) -> AstError {
    AstError::malformed(kind, format!("expected {} children, found {}", expected, got))
}
