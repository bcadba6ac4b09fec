//! End-to-end scenario tests, one per concrete example in SPEC_FULL.md's
//! testable-properties section: assemble a short program, run it to
//! completion, and inspect the resulting architectural state.

use rvmx::assembler::assemble;
use rvmx::sim::Simulator;
use rvmx::snapshot;

fn fill_grid_float(sim: &mut Simulator, idx: u8, value: f64) {
    let grid = sim.regs.grid_mut(idx);
    for row in grid.float.iter_mut() {
        for cell in row.iter_mut() {
            *cell = value;
        }
    }
}

fn fill_grid_int(sim: &mut Simulator, idx: u8, value: i32) {
    let grid = sim.regs.grid_mut(idx);
    for row in grid.int.iter_mut() {
        for cell in row.iter_mut() {
            *cell = value;
        }
    }
}

fn set_identity_float(sim: &mut Simulator, idx: u8) {
    let grid = sim.regs.grid_mut(idx);
    for i in 0..4 {
        grid.float[i][i] = 1.0;
    }
}

fn set_identity_int(sim: &mut Simulator, idx: u8) {
    let grid = sim.regs.grid_mut(idx);
    for i in 0..4 {
        grid.int[i][i] = 1;
    }
}

#[test]
fn config_round_trip() {
    let words = assemble("msettilemi 4\nmsettileni 4\nmsettileki 4\n").unwrap();
    let mut sim = Simulator::new();
    assert!(sim.run(&words));
    assert_eq!(sim.csr.mtilem, 4);
    assert_eq!(sim.csr.mtilen, 4);
    assert_eq!(sim.csr.mtilek, 4);
}

#[test]
fn fp32_identity_matmul() {
    let mut sim = Simulator::new();
    sim.csr.mtilem = 4;
    sim.csr.mtilen = 4;
    sim.csr.mtilek = 4;

    // acc0 (grid 0) starts at 10.0 everywhere.
    fill_grid_float(&mut sim, 0, 10.0);
    // "tr0" in a matmul mnemonic addresses grid slot 4 (the handler adds the
    // +4 tile-bank offset); fill it row-major 1..16.
    let a = sim.regs.grid_mut(4);
    for i in 0..4 {
        for j in 0..4 {
            a.float[i][j] = (4 * i + j + 1) as f64;
        }
    }
    // "tr1" -> grid slot 5: a 4x4 identity.
    set_identity_float(&mut sim, 5);

    let words = assemble("mfmacc.s acc0, tr0, tr1\n").unwrap();
    assert!(sim.run(&words));

    for i in 0..4 {
        for j in 0..4 {
            let expected = 10.0 + (4 * i + j + 1) as f64;
            assert_eq!(sim.regs.grid(0).float[i][j], expected, "at ({i}, {j})");
        }
    }
}

#[test]
fn int8_mac_with_saturation_off() {
    let mut sim = Simulator::new();
    sim.csr.mtilem = 4;
    sim.csr.mtilen = 4;
    sim.csr.mtilek = 4;
    sim.csr.xmsaten = 0;

    fill_grid_int(&mut sim, 2, 100); // acc2
    let a = sim.regs.grid_mut(4); // "tr0" -> grid 4
    for i in 0..4 {
        for j in 0..4 {
            a.int[i][j] = (4 * i + j + 1) as i32;
        }
    }
    set_identity_int(&mut sim, 5); // "tr1" -> grid 5

    let words = assemble("mmacc.w.b acc2, tr0, tr1\n").unwrap();
    assert!(sim.run(&words));

    for i in 0..4 {
        for j in 0..4 {
            let expected = 100 + (4 * i + j + 1) as i32;
            assert_eq!(sim.regs.grid(2).int[i][j], expected, "at ({i}, {j})");
        }
    }
}

#[test]
fn load_then_store_round_trips_fp32_through_memory() {
    let mut sim = Simulator::new();
    sim.csr.mtilem = 4;
    sim.csr.mtilek = 4;
    sim.gpr.write(1, 0x100);
    sim.gpr.write(2, 16); // row stride: 4 elements * 4 bytes
    sim.gpr.write(9, 0x140);

    let mut source = [0u8; 64];
    for (i, chunk) in source.chunks_mut(4).enumerate() {
        chunk.copy_from_slice(&(i as f32 + 0.5).to_le_bytes());
    }
    sim.memory.write(0x100, &source).unwrap();

    let words = assemble("mlae32 tr0, (x1), x2\nmsae32 tr0, (x9), x2\n").unwrap();
    assert!(sim.run(&words));

    assert_eq!(sim.memory.read(0x140, 64).unwrap(), &source[..]);
}

#[test]
fn load_then_store_round_trips_int8_accumulator_through_memory() {
    let mut sim = Simulator::new();
    sim.csr.mtilem = 4;
    sim.csr.mtilen = 4;
    sim.gpr.write(1, 0x200);
    sim.gpr.write(2, 4);
    sim.gpr.write(9, 0x240);

    let source: [u8; 16] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
    sim.memory.write(0x200, &source).unwrap();

    // mlce8/msce8 (func4=0b0010) address the C (accumulator) bank directly
    // by its tr/acc code (0-3), with no +4 offset.
    let words = assemble("mlce8 acc0, (x1), x2\nmsce8 acc0, (x9), x2\n").unwrap();
    assert!(sim.run(&words));

    assert_eq!(sim.memory.read(0x240, 16).unwrap(), &source[..]);
}

#[test]
fn elementwise_mfmul_multiplies_every_element() {
    let mut sim = Simulator::new();
    sim.csr.mtilem = 4;
    sim.csr.mtilen = 4;
    fill_grid_float(&mut sim, 1, 3.5); // acc1
    fill_grid_float(&mut sim, 2, 2.0); // acc2

    let words = assemble("mfmul.s acc0, acc2, acc1\n").unwrap();
    assert!(sim.run(&words));

    for row in sim.regs.grid(0).float.iter() {
        for &v in row.iter() {
            assert_eq!(v, 7.0);
        }
    }
}

#[test]
fn mrslidedown_shifts_rows_with_wraparound() {
    let mut sim = Simulator::new();
    let tr4 = sim.regs.grid_mut(4);
    for i in 0..4 {
        for j in 0..4 {
            tr4.int[i][j] = (4 * i + j + 1) as i32;
        }
    }

    let words = assemble("mrslidedown tr5, tr4, 1\n").unwrap();
    assert!(sim.run(&words));

    let tr5 = sim.regs.grid(5);
    assert_eq!(tr5.int[0], [13, 14, 15, 16]);
    assert_eq!(tr5.int[1], [1, 2, 3, 4]);
    assert_eq!(tr5.int[2], [5, 6, 7, 8]);
    assert_eq!(tr5.int[3], [9, 10, 11, 12]);
}

#[test]
fn assembler_resolves_a_forward_label_reference() {
    let words = assemble("mrelease\nloop: msettileni 2\nmsettilemi loop\n").unwrap();
    // "loop" names the word index of the msettileni instruction: word 1.
    let decoded = rvmx::decode::decode(words[2]).unwrap();
    match decoded {
        rvmx::decode::Instruction::Config(f) => assert_eq!(f.imm10, 1),
        other => panic!("expected Config, got {other:?}"),
    }
}

#[test]
fn snapshot_round_trip_reproduces_full_state() {
    let mut sim = Simulator::new();
    sim.csr.mtilem = 4;
    sim.csr.mtilen = 4;
    sim.csr.mtilek = 4;
    fill_grid_float(&mut sim, 0, 10.0);
    let a = sim.regs.grid_mut(4);
    for i in 0..4 {
        for j in 0..4 {
            a.float[i][j] = (4 * i + j + 1) as f64;
        }
    }
    set_identity_float(&mut sim, 5);
    sim.gpr.write(3, 0xABCD);
    sim.memory.write(0x10, &[1, 2, 3, 4]).unwrap();

    let words = assemble("mfmacc.s acc0, tr0, tr1\n").unwrap();
    assert!(sim.run(&words));

    let dir = std::env::temp_dir().join(format!("rvmx-scenario8-{}", std::process::id()));
    snapshot::write_all(&sim, &dir).unwrap();

    let mut restored = Simulator::new();
    snapshot::read_all(&mut restored, &dir).unwrap();

    assert_eq!(restored.gpr.read(3), 0xABCD);
    assert_eq!(restored.csr.mtilem, 4);
    assert_eq!(restored.csr.mtilen, 4);
    assert_eq!(restored.csr.mtilek, 4);
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(restored.regs.grid(0).float[i][j], sim.regs.grid(0).float[i][j]);
        }
    }
    assert_eq!(restored.memory.read(0x10, 4).unwrap(), &[1, 2, 3, 4]);

    std::fs::remove_dir_all(&dir).ok();
}
