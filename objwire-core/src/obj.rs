//! Wavefront OBJ loader for `v` and `f` lines

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{digit0, digit1, i64 as integer, multispace1, one_of},
    combinator::{all_consuming, opt, recognize},
    multi::separated_list0,
    number::complete::float,
    sequence::pair,
    IResult,
};
use std::path::Path;

use crate::error::{ObjError, ObjResult, ParseErrorKind};
use crate::geometry::{Face, Mesh};

/// How malformed `v`/`f` lines are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Numbers are read from the front of each token; bad vertex
    /// components become NaN and faces without a usable index are dropped.
    #[default]
    Lenient,
    /// Tokens must be whole numbers; offending lines are dropped.
    SkipInvalid,
    /// The first offending line aborts the load, and face indices are
    /// checked against the vertex count.
    Strict,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub mode: ParseMode,
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self {
            mode: ParseMode::Strict,
        }
    }
}

/// Load a mesh leniently. Never fails.
pub fn load_mesh(text: &str) -> Mesh {
    let mut mesh = Mesh::new();
    for (number, line) in text.lines().enumerate() {
        if let Err(kind) = read_line(&mut mesh, line, ParseMode::Lenient) {
            log::warn!("skipping OBJ line {}: {}", number + 1, kind);
        }
    }
    log::debug!(
        "parsed OBJ: {} vertices, {} faces",
        mesh.vertices.len(),
        mesh.faces.len()
    );
    mesh
}

/// Load a mesh with explicit error handling.
pub fn load_mesh_with(text: &str, options: &LoadOptions) -> ObjResult<Mesh> {
    if options.mode == ParseMode::Lenient {
        return Ok(load_mesh(text));
    }

    let mut mesh = Mesh::new();
    for (number, line) in text.lines().enumerate() {
        match read_line(&mut mesh, line, options.mode) {
            Ok(()) => {}
            Err(kind) if options.mode == ParseMode::Strict => {
                return Err(ObjError::Parse {
                    line: number + 1,
                    kind,
                })
            }
            Err(kind) => log::warn!("skipping OBJ line {}: {}", number + 1, kind),
        }
    }

    if options.mode == ParseMode::Strict {
        mesh.validate()?;
    }
    log::debug!(
        "parsed OBJ: {} vertices, {} faces",
        mesh.vertices.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

/// Read and parse an OBJ file from disk.
pub fn load_mesh_file(path: impl AsRef<Path>, options: &LoadOptions) -> ObjResult<Mesh> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ObjError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_mesh_with(&text, options)
}

/// Apply one line to `mesh`. Lines that are not `v` or `f` are ignored.
fn read_line(mesh: &mut Mesh, line: &str, mode: ParseMode) -> Result<(), ParseErrorKind> {
    let tokens = tokenize(line);
    match tokens.split_first() {
        Some((&"v", args)) => {
            let [x, y, z] = parse_vertex(args, mode)?;
            mesh.add_vertex(x, y, z);
        }
        Some((&"f", args)) => mesh.add_face(parse_face(args, mode)?),
        _ => {}
    }
    Ok(())
}

fn tokenize(line: &str) -> Vec<&str> {
    let parsed: IResult<&str, Vec<&str>> =
        separated_list0(multispace1, take_till1(char::is_whitespace))(line.trim());
    parsed.map(|(_, tokens)| tokens).unwrap_or_default()
}

fn parse_vertex(args: &[&str], mode: ParseMode) -> Result<[f32; 3], ParseErrorKind> {
    let mut coords = [f32::NAN; 3];
    if args.len() < 3 && mode != ParseMode::Lenient {
        return Err(ParseErrorKind::MissingComponent(args.len()));
    }
    for (slot, token) in coords.iter_mut().zip(args) {
        *slot = match parse_number(token, mode) {
            Some(value) => value,
            None if mode == ParseMode::Lenient => f32::NAN,
            None => return Err(ParseErrorKind::InvalidNumber(token.to_string())),
        };
    }
    Ok(coords)
}

fn parse_face(args: &[&str], mode: ParseMode) -> Result<Face, ParseErrorKind> {
    if args.is_empty() && mode != ParseMode::Lenient {
        return Err(ParseErrorKind::EmptyFace);
    }
    args.iter()
        .map(|token| {
            // Texture and normal references after the first '/' are ignored
            let head = token.split('/').next().unwrap_or_default();
            parse_index(head, mode)
                .ok_or_else(|| ParseErrorKind::InvalidIndex(token.to_string()))
        })
        .collect()
}

fn parse_number(token: &str, mode: ParseMode) -> Option<f32> {
    let parsed: IResult<&str, f32> = match mode {
        ParseMode::Lenient => float(token),
        _ => all_consuming(float)(token),
    };
    match parsed {
        Ok((_, value)) => Some(value),
        // `float` rejects a dangling exponent such as "1e"; keep the mantissa
        Err(_) if mode == ParseMode::Lenient => {
            mantissa(token).ok().and_then(|(_, digits)| digits.parse().ok())
        }
        Err(_) => None,
    }
}

/// Signed decimal without exponent: `1`, `-1.`, `+.5`, `2.25`.
fn mantissa(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        opt(one_of("+-")),
        alt((
            recognize(pair(digit1, opt(pair(tag("."), digit0)))),
            recognize(pair(tag("."), digit1)),
        )),
    ))(input)
}

/// 1-based OBJ index to 0-based.
fn parse_index(token: &str, mode: ParseMode) -> Option<usize> {
    let parsed: IResult<&str, i64> = match mode {
        ParseMode::Lenient => integer(token),
        _ => all_consuming(integer)(token),
    };
    let (_, one_based) = parsed.ok()?;
    usize::try_from(one_based.checked_sub(1)?).ok()
}
