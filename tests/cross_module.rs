//! Cross-module agreement tests: the assembler's bit placement and the
//! emulator's decode must match byte for byte, since the immediate bits
//! are the only thing separating a value from a register index.

use leg_assembler::{assemble, assemble_program};
use leg_spec::{DecodedOpcode, Instruction, OpClass, Program};

fn first_instruction(source: &str) -> Instruction {
    let program = assemble_program(source).expect("assembly failed");
    program.fetch(0).expect("program is empty")
}

#[test]
fn test_round_trip_without_labels() {
    // Assembling then decoding yields the hand-computed tuple exactly.
    let cases = [
        ("ADD R0 5 R1", Instruction::new(66, 0, 5, 1)),
        ("ADD 5 R0 R1", Instruction::new(130, 5, 0, 1)),
        ("SUB R2 R3 R4", Instruction::new(3, 2, 3, 4)),
        ("MOV R0 IO", Instruction::new(64, 0, 0, 7)),
        ("SAVE 42", Instruction::new(144, 42, 0, 0)),
        ("LOAD R0", Instruction::new(24, 0, 0, 0)),
        ("PROM R1", Instruction::new(25, 0, 0, 1)),
        ("RET", Instruction::new(39, 0, 0, 0)),
        ("HALT", Instruction::new(255, 0, 0, 0)),
    ];
    for (source, expected) in cases {
        assert_eq!(first_instruction(source), expected, "{source}");
    }
}

#[test]
fn test_listing_and_image_agree() {
    let source = r#"
        MOV 5 R0
        LABEL LOOP
        SUB R0 1 R0
        BN R0 0 LOOP
        HALT
    "#;
    let listing = assemble(source).unwrap();
    let from_text = Program::from_text(&listing).unwrap();
    let direct = assemble_program(source).unwrap();
    assert_eq!(from_text, direct);
}

#[test]
fn test_immediate_bits_survive_decode() {
    let decoded = first_instruction("ADD R0 5 R1").decode().unwrap();
    assert!(!decoded.imm_left);
    assert!(decoded.imm_right);

    let decoded = first_instruction("ADD 5 R0 R1").decode().unwrap();
    assert!(decoded.imm_left);
    assert!(!decoded.imm_right);
}

#[test]
fn test_every_mnemonic_decodes_to_its_class() {
    let cases: [(&str, fn(OpClass) -> bool); 8] = [
        ("ADD R0 R1 R2", |c| matches!(c, OpClass::Alu(_))),
        ("MOV R0 R1", |c| matches!(c, OpClass::Alu(_))),
        ("BGE R0 R1 L", |c| matches!(c, OpClass::Branch(_))),
        ("CALL L", |c| matches!(c, OpClass::Call)),
        ("RET", |c| matches!(c, OpClass::Ret)),
        ("SAVE R0", |c| matches!(c, OpClass::Save)),
        ("LOAD R0", |c| matches!(c, OpClass::Load)),
        ("PROM R0", |c| matches!(c, OpClass::PromRead)),
    ];
    for (line, is_expected) in cases {
        let source = format!("LABEL L\n{line}");
        let program = assemble_program(&source).unwrap();
        let decoded = program.fetch(0).unwrap().decode().unwrap();
        assert!(is_expected(decoded.class), "{line}: {:?}", decoded.class);
    }
}

#[test]
fn test_branch_targets_are_absolute_byte_addresses() {
    let source = r#"
        JUMP END
        ADD R0 R0 R0
        ADD R0 R0 R0
        LABEL END
        HALT
    "#;
    let program = assemble_program(source).unwrap();
    let jump = program.fetch(0).unwrap();
    assert_eq!(jump.arg2, 12);
    // And the target byte really is the halt opcode.
    assert_eq!(program.read_byte(12).unwrap(), 255);
}

#[test]
fn test_halt_decode_beats_every_mask() {
    let halt = first_instruction("HALT");
    let decoded = DecodedOpcode::from_byte(halt.opcode).unwrap();
    assert_eq!(decoded.class, OpClass::Halt);
}
