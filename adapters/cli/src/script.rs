//! Scripted room setups loaded from TOML and `--drag` flags.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use room_topology_core::{CellCoord, Direction};
use serde::Deserialize;

/// Room dimensions and the drags to replay on it.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Script {
    pub(crate) room: RoomSection,
    pub(crate) drags: Vec<Drag>,
}

/// Room table of a script; absent values fall back to the defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RoomSection {
    pub(crate) columns: Option<u32>,
    pub(crate) rows: Option<u32>,
    pub(crate) tile_length: Option<f32>,
    pub(crate) neighborhood_steps: Option<usize>,
}

/// Drag of the wall on side `facing` of the floor at `cell` by `steps` cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Drag {
    pub(crate) cell: CellCoord,
    pub(crate) facing: Direction,
    pub(crate) steps: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ScriptFile {
    room: RoomSection,
    drag: Vec<DragEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DragEntry {
    cell: [i32; 2],
    facing: String,
    steps: i32,
}

impl Script {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read room script at {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid room script {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let file: ScriptFile =
            toml::from_str(contents).context("failed to parse room script toml contents")?;
        let drags = file
            .drag
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let facing = parse_facing(&entry.facing)
                    .with_context(|| format!("drag #{} has an invalid facing", index + 1))?;
                Ok(Drag {
                    cell: CellCoord::new(entry.cell[0], entry.cell[1]),
                    facing,
                    steps: entry.steps,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            room: file.room,
            drags,
        })
    }
}

/// Parses a drag written as `x,y,facing,steps`.
pub(crate) fn parse_drag(value: &str) -> Result<Drag> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x, y, facing, steps] = parts.as_slice() else {
        bail!("expected `x,y,facing,steps`, got `{value}`");
    };
    let x = x.parse().with_context(|| format!("invalid column `{x}`"))?;
    let y = y.parse().with_context(|| format!("invalid row `{y}`"))?;
    let steps = steps
        .parse()
        .with_context(|| format!("invalid step count `{steps}`"))?;
    Ok(Drag {
        cell: CellCoord::new(x, y),
        facing: parse_facing(facing)?,
        steps,
    })
}

fn parse_facing(name: &str) -> Result<Direction> {
    match name.to_ascii_lowercase().as_str() {
        "n" | "north" => Ok(Direction::North),
        "e" | "east" => Ok(Direction::East),
        "s" | "south" => Ok(Direction::South),
        "w" | "west" => Ok(Direction::West),
        _ => bail!("unknown facing `{name}`"),
    }
}
