// tests/simulation_tests.rs

use qplay::{Circuit, CircuitBuilder, Executor, Gate, Operation, SamplingFailure, Simulator, SimulatorConfig};
use std::f64::consts::PI;

type TestResult = Result<(), SamplingFailure>;

#[test]
fn test_empty_circuit_measures_all_zero() -> TestResult {
    let circuit = Circuit::new(3)?;
    let counts = Simulator::seeded(0).execute(&circuit, 100)?;

    assert_eq!(counts.get("000"), 100);
    assert!(counts.is_deterministic(), "Empty circuit should stay in |000>");
    Ok(())
}

#[test]
fn test_x_flips_rightmost_bit() -> TestResult {
    let mut circuit = Circuit::new(3)?;
    circuit.x(0)?;
    let counts = Simulator::seeded(0).execute(&circuit, 50)?;
    assert_eq!(counts.get("001"), 50, "Qubit 0 is the rightmost character");

    let mut circuit = Circuit::new(3)?;
    circuit.x(2)?;
    let counts = Simulator::seeded(0).execute(&circuit, 50)?;
    assert_eq!(counts.get("100"), 50);
    Ok(())
}

#[test]
fn test_hh_is_identity() -> TestResult {
    let circuit = CircuitBuilder::new(1)
        .gate(Gate::H, 0)
        .gate(Gate::H, 0)
        .build()?;
    let counts = Simulator::seeded(1).execute(&circuit, 200)?;
    assert_eq!(counts.get("0"), 200);
    Ok(())
}

#[test]
fn test_phase_gates_do_not_change_z_basis_counts() -> TestResult {
    // S, T, Z and P only change phases, which Z-basis measurement ignores.
    let mut circuit = Circuit::new(1)?;
    circuit.x(0)?.s(0)?.t(0)?.z(0)?.p(PI / 3.0, 0)?;
    let counts = Simulator::seeded(2).execute(&circuit, 64)?;
    assert_eq!(counts.get("1"), 64);
    Ok(())
}

#[test]
fn test_phase_kickback_through_hadamards() -> TestResult {
    // H Z H = X
    let mut circuit = Circuit::new(1)?;
    circuit.h(0)?.z(0)?.h(0)?;
    let counts = Simulator::seeded(3).execute(&circuit, 64)?;
    assert_eq!(counts.get("1"), 64);

    // H S S H = X as well, since S S = Z
    let mut circuit = Circuit::new(1)?;
    circuit.h(0)?.s(0)?.s(0)?.h(0)?;
    let counts = Simulator::seeded(3).execute(&circuit, 64)?;
    assert_eq!(counts.get("1"), 64);
    Ok(())
}

#[test]
fn test_cx_only_fires_on_set_control() -> TestResult {
    let mut circuit = Circuit::new(2)?;
    circuit.cx(0, 1)?;
    assert_eq!(Simulator::seeded(0).execute(&circuit, 10)?.get("00"), 10);

    let mut circuit = Circuit::new(2)?;
    circuit.x(0)?.cx(0, 1)?;
    assert_eq!(Simulator::seeded(0).execute(&circuit, 10)?.get("11"), 10);

    // Reversed roles: control on qubit 1
    let mut circuit = Circuit::new(2)?;
    circuit.x(1)?.cx(1, 0)?;
    assert_eq!(Simulator::seeded(0).execute(&circuit, 10)?.get("11"), 10);
    Ok(())
}

#[test]
fn test_ghz_three_qubits() -> TestResult {
    let circuit = CircuitBuilder::new(3)
        .gate(Gate::H, 0)
        .cx(0, 1)
        .cx(1, 2)
        .build()?;
    let counts = Simulator::seeded(11).execute(&circuit, 2000)?;

    assert_eq!(counts.shots(), 2000);
    assert_eq!(counts.get("000") + counts.get("111"), 2000);
    assert!(counts.get("000") > 800 && counts.get("111") > 800);
    Ok(())
}

#[test]
fn test_uniform_superposition_hits_every_state() -> TestResult {
    let mut circuit = Circuit::new(2)?;
    circuit.h(0)?.h(1)?;
    let counts = Simulator::seeded(5).execute(&circuit, 4000)?;

    assert_eq!(counts.len(), 4);
    for state in ["00", "01", "10", "11"] {
        let n = counts.get(state);
        assert!((800..1200).contains(&n), "|{}> drew {} of 4000", state, n);
    }
    Ok(())
}

#[test]
fn test_seeded_runs_repeat() -> TestResult {
    let mut circuit = Circuit::new(2)?;
    circuit.h(0)?.h(1)?;
    let a = Simulator::seeded(99);
    let b = Simulator::seeded(99);
    assert_eq!(a.execute(&circuit, 500)?, b.execute(&circuit, 500)?);
    assert_eq!(a.execute(&circuit, 500)?, b.execute(&circuit, 500)?);
    Ok(())
}

#[test]
fn test_max_qubits_enforced() -> TestResult {
    let simulator = Simulator::with_config(SimulatorConfig::default().with_max_qubits(2));
    let circuit = Circuit::new(3)?;
    assert_eq!(
        simulator.execute(&circuit, 1),
        Err(SamplingFailure::CircuitTooLarge { num_qubits: 3, max_qubits: 2 })
    );
    Ok(())
}

#[test]
fn test_builder_reports_first_error() {
    let result = CircuitBuilder::new(2)
        .gate(Gate::H, 5)
        .cx(0, 0)
        .build();
    assert_eq!(
        result,
        Err(SamplingFailure::QubitOutOfRange { qubit: 5, num_qubits: 2 })
    );
}

#[test]
fn test_operation_constructors_validate() {
    assert!(Operation::single(Gate::Cx, 0).is_err());
    assert_eq!(
        Operation::controlled(1, 1),
        Err(SamplingFailure::DuplicateQubit { qubit: 1 })
    );
}
