#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that lays out a room, replays wall drags and prints the result.

mod host;
mod render;
mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use glam::Vec2;
use log::{info, warn};
use room_topology_core::{Command, Direction, ElementId, Event, Placement};
use room_topology_system_wall_drag::{DragInput, WallDrag};
use room_topology_world::{apply, dispatch, query, Room, RoomConfig};

use crate::{
    host::Scene,
    script::{Drag, Script},
};

const DEFAULT_COLUMNS: u32 = 3;
const DEFAULT_ROWS: u32 = 3;

/// Lays out a rectangular room and drags its walls around.
#[derive(Debug, Parser)]
#[command(name = "room-editor", author, version, about)]
struct Args {
    /// TOML script with a `[room]` table and `[[drag]]` entries
    #[arg(long)]
    script: Option<PathBuf>,

    /// Number of columns of the initial room
    #[arg(long)]
    columns: Option<u32>,

    /// Number of rows of the initial room
    #[arg(long)]
    rows: Option<u32>,

    /// Side length of a cell in world units
    #[arg(long)]
    tile_length: Option<f32>,

    /// Boundary elements inspected on each side of a dragged wall
    #[arg(long)]
    neighborhood_steps: Option<usize>,

    /// Extra drag replayed after the scripted ones, written as `x,y,facing,steps`
    #[arg(long = "drag", value_parser = script::parse_drag)]
    drags: Vec<Drag>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Entry point for the room editor command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };
    script.drags.extend(args.drags.iter().copied());

    let defaults = RoomConfig::default();
    let config = RoomConfig {
        tile_length: args
            .tile_length
            .or(script.room.tile_length)
            .unwrap_or(defaults.tile_length),
        neighborhood_steps: args
            .neighborhood_steps
            .or(script.room.neighborhood_steps)
            .unwrap_or(defaults.neighborhood_steps),
    };
    let columns = args.columns.or(script.room.columns).unwrap_or(DEFAULT_COLUMNS);
    let rows = args.rows.or(script.room.rows).unwrap_or(DEFAULT_ROWS);

    let mut room = Room::new(config);
    let mut scene = Scene::default();
    let mut events = Vec::new();
    apply(&mut room, Command::CreateRoom { columns, rows }, &mut events);
    if !events.iter().any(|event| matches!(event, Event::RoomCreated { .. })) {
        anyhow::bail!("could not create a {columns}x{rows} room");
    }
    dispatch(&events, config.tile_length, &mut scene);
    info!("created a {columns}x{rows} room");

    let mut drag = WallDrag::new(config.tile_length);
    for (index, entry) in script.drags.iter().enumerate() {
        replay(&mut room, &mut drag, &mut scene, *entry)
            .with_context(|| format!("drag #{} failed", index + 1))?;
    }

    print!("{}", render::render(&room));
    println!("{}", scene.summary());
    Ok(())
}

/// Feeds one tile of pointer motion per frame until the drag is done or the
/// room stops accepting it.
fn replay(room: &mut Room, drag: &mut WallDrag, scene: &mut Scene, entry: Drag) -> Result<()> {
    let wall = query::wall_at(room, entry.cell, entry.facing).with_context(|| {
        format!(
            "no wall on side {:?} of cell ({}, {})",
            entry.facing,
            entry.cell.x(),
            entry.cell.y()
        )
    })?;
    let tile_length = query::config(room).tile_length;
    let (dx, dy) = entry.facing.offset();
    let frame_motion = Vec2::new(dx as f32, dy as f32) * tile_length * entry.steps.signum() as f32;

    let mut commands = Vec::new();
    let mut events = Vec::new();
    let mut input = DragInput::new(Some(wall), Vec2::ZERO, false);
    for _ in 0..entry.steps.unsigned_abs() {
        input.motion = frame_motion;
        drag.handle(&events, input, |id| wall_facing(room, id), &mut commands);
        input = DragInput::default();
        events.clear();
        if commands.is_empty() {
            break;
        }
        for command in commands.drain(..) {
            apply(room, command, &mut events);
        }
        dispatch(&events, tile_length, scene);
        if let Some(reason) = events.iter().find_map(|event| match event {
            Event::EditRejected { reason, .. } => Some(*reason),
            _ => None,
        }) {
            warn!("room rejected dragging {wall:?}: {reason:?}");
            break;
        }
    }
    drag.handle(
        &events,
        DragInput::new(None, Vec2::ZERO, true),
        |id| wall_facing(room, id),
        &mut commands,
    );
    Ok(())
}

fn wall_facing(room: &Room, wall: ElementId) -> Option<Direction> {
    match query::element(room, wall)?.placement() {
        Placement::Wall { facing, .. } => Some(facing),
        _ => None,
    }
}
