//! End-to-end integration tests for the LEG toolchain
//!
//! These tests verify the complete workflow:
//! 1. Assemble source text into the decimal listing
//! 2. Parse the listing back into a program image
//! 3. Execute the program in the emulator
//! 4. Verify outputs and terminal state

use leg_assembler::{assemble, assemble_with_options, AssembleOptions};
use leg_runtime::{Emulator, EmulatorConfig, QueuedIo, RunOutcome};
use leg_spec::Program;

fn assemble_and_run(source: &str, inputs: Vec<u8>) -> Vec<u8> {
    let listing = assemble(source).expect("assembly failed");
    let program = Program::from_text(&listing).expect("listing did not parse");
    leg_runtime::run(program, inputs).expect("execution failed")
}

#[test]
fn test_arithmetic_pipeline() {
    let source = r#"
        # (10 + 20) xor 6, emitted on the port
        MOV 10 R0
        ADD R0 20 R0
        XOR R0 6 IO
        HALT
    "#;
    assert_eq!(assemble_and_run(source, vec![]), vec![24]);
}

#[test]
fn test_interactive_doubler() {
    let source = r#"
        LABEL LOOP
        MOV IO R0
        ADD R0 R0 IO
        JUMP LOOP
    "#;
    assert_eq!(assemble_and_run(source, vec![1, 2, 100]), vec![2, 4, 200]);
}

#[test]
fn test_fibonacci() {
    let source = r#"
        MOV 0 R0
        MOV 1 R1
        MOV 10 R2
        LABEL LOOP
        MOV R0 IO
        ADD R0 R1 R3
        MOV R1 R0
        MOV R3 R1
        SUB R2 1 R2
        BN R2 0 LOOP
        HALT
    "#;
    assert_eq!(
        assemble_and_run(source, vec![]),
        vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]
    );
}

#[test]
fn test_memory_accumulator() {
    // Sum three inputs through a RAM cell instead of a register.
    let source = r#"
        CONST ACC 0
        MOV ACC ADDR
        MOV 3 R2
        LABEL LOOP
        LOAD R1
        MOV IO R0
        ADD R0 R1 R0
        SAVE R0
        SUB R2 1 R2
        BN R2 0 LOOP
        LOAD R1
        MOV R1 IO
        HALT
    "#;
    assert_eq!(assemble_and_run(source, vec![5, 6, 7]), vec![18]);
}

#[test]
fn test_message_walker() {
    // Emit a PROM string, one character code per cycle of the loop.
    let source = r#"
        JUMP MAIN
        LABEL MSG
        "HI!"
        CONST LEN 3
        LABEL MAIN
        MOV MSG ADDR
        MOV 0 R2
        LABEL LOOP
        PROM R0
        MOV R0 IO
        ADD ADDR 1 ADDR
        ADD R2 1 R2
        BN R2 LEN LOOP
        HALT
    "#;
    assert_eq!(assemble_and_run(source, vec![]), vec![72, 73, 33]);
}

#[test]
fn test_annotated_listing_round_trips() {
    let source = "MOV 9 IO\nHALT";
    let options = AssembleOptions {
        append_source: true,
    };
    let listing = assemble_with_options(source, &options).unwrap();
    let program = Program::from_text(&listing).unwrap();
    assert_eq!(leg_runtime::run(program, vec![]).unwrap(), vec![9]);
}

#[test]
fn test_pause_and_resume_preserves_machine_state() {
    let source = r#"
        MOV 200 R4
        MOV IO R0
        ADD R0 R4 IO
        HALT
    "#;
    let listing = assemble(source).unwrap();
    let program = Program::from_text(&listing).unwrap();
    let mut emu = Emulator::new(program, QueuedIo::new(), EmulatorConfig::default());

    let paused = emu.run().unwrap();
    assert_eq!(paused.outcome, RunOutcome::AwaitingInput);
    // The register written before the pause survives it.
    assert_eq!(emu.state().read(4), 200);

    emu.io_mut().push_input(50);
    let result = emu.run().unwrap();
    assert_eq!(result.outcome, RunOutcome::Halted);
    assert_eq!(emu.io().outputs(), &[250]);
}
