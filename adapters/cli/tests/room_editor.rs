use std::process::Command;

fn room_editor(args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_room-editor"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run the room-editor binary");
    assert!(
        output.status.success(),
        "room-editor failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("utf-8 output")
}

#[test]
fn dragging_a_single_cell_room_north_adds_a_row() {
    let stdout = room_editor(&["--columns", "1", "--rows", "1", "--drag", "0,0,north,1"]);
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(
        lines,
        vec![
            "   1 #",
            "   0 #",
            "     origin (0, 0)",
            "floors 2 walls 6 inner corners 0 outer corners 4",
            "scene: 12 live, 12 spawned, 0 destroyed, 3 moved",
        ]
    );
}

#[test]
fn rejected_drags_leave_the_room_as_created() {
    let stdout = room_editor(&["--columns", "1", "--rows", "1", "--drag", "0,0,north,-1"]);

    assert!(stdout.starts_with("   0 #\n"));
    assert!(stdout.contains("floors 1 walls 4 inner corners 0 outer corners 4"));
    assert!(stdout.contains("scene: 9 live, 9 spawned, 0 destroyed, 0 moved"));
}
