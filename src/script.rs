use delve_catalog::Mode;
use delve_geom::Direction;
use thiserror::Error;

use crate::session::Command;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct ScriptError {
    pub line: usize,
    pub reason: String,
}

/// Parse a command script. Blank lines and anything after `#` are ignored.
pub fn parse_script(src: &str) -> Result<Vec<Command>, ScriptError> {
    let mut out = Vec::new();
    for (i, raw) in src.lines().enumerate() {
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let cmd = parse_line(text).map_err(|reason| ScriptError { line: i + 1, reason })?;
        out.push(cmd);
    }
    Ok(out)
}

fn parse_line(text: &str) -> Result<Command, String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let cmd = match words.as_slice() {
        ["move", dir] => Command::Move(direction(dir)?, 1),
        ["move", dir, n] => Command::Move(direction(dir)?, count(n)?),
        ["layer", dir] => layer(dir, 1)?,
        ["layer", dir, n] => layer(dir, count(n)?)?,
        ["goto", column, row] => Command::Goto {
            column: coordinate(column)?,
            row: coordinate(row)?,
        },
        ["mode", name] => Command::SetMode(Mode::parse(name).map_err(|e| e.to_string())?),
        ["select"] => Command::Select,
        ["cancel"] => Command::Cancel,
        ["paste"] => Command::Paste,
        [word, ..] => return Err(format!("cannot parse `{}` command `{}`", word, text)),
        [] => return Err("empty command".into()),
    };
    Ok(cmd)
}

fn direction(s: &str) -> Result<Direction, String> {
    Direction::parse(s).ok_or_else(|| format!("unknown direction `{}`", s))
}

fn layer(dir: &str, n: u32) -> Result<Command, String> {
    match dir {
        "up" => Ok(Command::LayerUp(n)),
        "down" => Ok(Command::LayerDown(n)),
        other => Err(format!("layer direction must be up or down, got `{}`", other)),
    }
}

fn count(s: &str) -> Result<u32, String> {
    s.parse().map_err(|_| format!("`{}` is not a step count", s))
}

fn coordinate(s: &str) -> Result<i32, String> {
    s.parse().map_err(|_| format!("`{}` is not a coordinate", s))
}
