use keymill_core::motion::MotionCommand;
use keymill_core::program::Statement;
use keymill_patterns::plate::{compose_plate_program, PlateLayout, PlateParameters};

#[test]
fn test_program_preamble() {
    let layout = PlateLayout::left_hand();
    let program = compose_plate_program(&layout, &PlateParameters::default()).unwrap();

    let statements = program.statements();
    assert_eq!(statements[0], Statement::PlaneXY);
    assert_eq!(statements[1], Statement::UnitsMillimeters);
    assert_eq!(statements[2], Statement::AbsolutePositioning);
    assert_eq!(
        statements[3],
        Statement::RapidAbsolute {
            x: None,
            y: None,
            z: Some(5.0)
        }
    );
}

#[test]
fn test_motion_only_in_relative_mode() {
    let layout = PlateLayout::left_hand();
    let program = compose_plate_program(&layout, &PlateParameters::default()).unwrap();

    let mut relative = false;
    for statement in program.statements() {
        match statement {
            Statement::RelativePositioning => relative = true,
            Statement::AbsolutePositioning => relative = false,
            Statement::Motion(_) => assert!(relative, "relative motion under absolute mode"),
            Statement::RapidAbsolute { .. } => {
                assert!(!relative, "absolute rapid under relative mode")
            }
            _ => {}
        }
    }
    // The program hands the machine back in absolute mode.
    assert!(!relative);
}

#[test]
fn test_one_relative_section_per_feature() {
    let layout = PlateLayout::left_hand();
    let program = compose_plate_program(&layout, &PlateParameters::default()).unwrap();

    let sections = program
        .statements()
        .iter()
        .filter(|s| matches!(s, Statement::RelativePositioning))
        .count();
    // One per switch cutout, one for the fixing-hole drill cycle, one
    // for the boundary cut.
    assert_eq!(sections, layout.switches.len() + 2);
}

#[test]
fn test_every_feature_returns_to_clearance() {
    let layout = PlateLayout::left_hand();
    let program = compose_plate_program(&layout, &PlateParameters::default()).unwrap();

    // Inside each relative section the motion must sum to zero net Z:
    // every feature starts and ends at clearance height.
    let mut section_z: f64 = 0.0;
    let mut in_section = false;
    for statement in program.statements() {
        match statement {
            Statement::RelativePositioning => {
                in_section = true;
                section_z = 0.0;
            }
            Statement::AbsolutePositioning => {
                if in_section {
                    assert!(section_z.abs() < 1e-9, "feature left the tool at depth");
                }
                in_section = false;
            }
            Statement::Motion(command) => {
                let (_, _, dz) = command.delta();
                section_z += dz;
            }
            _ => {}
        }
    }
}

#[test]
fn test_boundary_cut_is_last_feature() {
    let layout = PlateLayout::left_hand();
    let program = compose_plate_program(&layout, &PlateParameters::default()).unwrap();

    // The final cutting motion of the program is the boundary's
    // finishing revolution followed by its retract rapids.
    let arcs: Vec<&Statement> = program
        .statements()
        .iter()
        .filter(|s| matches!(s, Statement::Motion(MotionCommand::Arc { .. })))
        .collect();
    assert!(!arcs.is_empty());

    let last_arc_index = program
        .statements()
        .iter()
        .rposition(|s| matches!(s, Statement::Motion(MotionCommand::Arc { .. })))
        .unwrap();
    let last_cut_index = program
        .statements()
        .iter()
        .rposition(|s| matches!(s, Statement::Motion(c) if c.is_cutting()))
        .unwrap();
    assert_eq!(last_arc_index, last_cut_index);

    // Boundary pitch 1.0 into depth 3.8: remainder + 3 full helical
    // revolutions + finishing pass.
    assert_eq!(arcs.len(), 5);
}

#[test]
fn test_layout_serializes_for_stats() {
    let layout = PlateLayout::left_hand();
    let json = serde_json::to_string(&layout).unwrap();
    assert!(json.contains("\"switches\""));
    assert!(json.contains("\"fixing_holes\""));
    assert!(json.contains("\"boundary_diameter\""));
}
