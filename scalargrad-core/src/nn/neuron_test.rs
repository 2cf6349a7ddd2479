use super::*;
use crate::nn::init::UniformInit;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn fixed_neuron(tape: &Tape, nonlin: bool) -> Result<Neuron, AutogradError> {
    let weights = vec![tape.leaf(2.0), tape.leaf(-3.0)];
    Neuron::from_values(tape, weights, Some(tape.leaf(1.0)), nonlin)
}

#[test]
fn test_neuron_parameter_layout() -> Result<(), AutogradError> {
    let tape: Tape = Tape::new();
    let mut rng = StdRng::seed_from_u64(1);
    let n = Neuron::new(&tape, 3, true, &LayerConfig::default(), &mut rng)?;
    assert_eq!(n.nin(), 3);
    assert_eq!(n.parameters().len(), 4);
    assert!(n.parameters().iter().all(|p| p.is_leaf() && (-1.0..1.0).contains(&p.data())));

    let names: Vec<String> = n.named_parameters().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["weights.0", "weights.1", "weights.2", "bias"]);
    assert_eq!(format!("{:?}", n), "ReLUNeuron(3)");
    Ok(())
}

#[test]
fn test_neuron_without_bias() -> Result<(), AutogradError> {
    let tape: Tape = Tape::new();
    let mut rng = StdRng::seed_from_u64(1);
    let config = LayerConfig::default().with_bias(false);
    let n = Neuron::new(&tape, 2, false, &config, &mut rng)?;
    assert!(n.bias().is_none());
    assert_eq!(n.num_parameters(), 2);
    assert_eq!(format!("{:?}", n), "LinearNeuron(2)");
    Ok(())
}

#[test]
fn test_linear_neuron_forward_backward() -> Result<(), AutogradError> {
    let tape: Tape = Tape::new();
    let n = fixed_neuron(&tape, false)?;
    let x = vec![tape.leaf(1.0), tape.leaf(4.0)];

    let out = n.forward(&x)?;
    // 2*1 - 3*4 + 1
    assert_eq!(out.data(), -9.0);
    out.backward();

    assert_eq!(n.weights()[0].grad(), 1.0);
    assert_eq!(n.weights()[1].grad(), 4.0);
    assert_eq!(n.bias().map(|b| b.grad()), Some(1.0));
    assert_eq!(x[0].grad(), 2.0);
    assert_eq!(x[1].grad(), -3.0);
    Ok(())
}

#[test]
fn test_relu_neuron_blocks_negative_pre_activation() -> Result<(), AutogradError> {
    let tape: Tape = Tape::new();
    let n = fixed_neuron(&tape, true)?;
    let out = n.forward_literals(&[1.0, 4.0])?;
    assert_eq!(out.data(), 0.0);
    out.backward();
    assert!(n.parameters().iter().all(|p| p.grad() == 0.0));

    let out = n.forward_literals(&[3.0, 1.0])?;
    assert_eq!(out.data(), 4.0);
    out.backward();
    assert_eq!(n.weights()[0].grad(), 3.0);
    Ok(())
}

#[test]
fn test_neuron_width_mismatch() -> Result<(), AutogradError> {
    let tape: Tape = Tape::new();
    let n = fixed_neuron(&tape, true)?;
    let err = n.forward_literals(&[1.0]).unwrap_err();
    assert_eq!(
        err,
        AutogradError::InputWidthMismatch {
            expected: 2,
            actual: 1,
            operation: "Neuron::forward".to_string(),
        }
    );
    Ok(())
}

#[test]
fn test_neuron_rejects_inputs_from_another_tape() -> Result<(), AutogradError> {
    let tape: Tape = Tape::new();
    let n = fixed_neuron(&tape, false)?;
    let other: Tape = Tape::new();
    let x = vec![other.leaf(1.0), other.leaf(1.0)];
    assert!(matches!(n.forward(&x), Err(AutogradError::TapeMismatch { .. })));

    let stray = other.leaf(0.5);
    assert!(Neuron::from_values(&tape, vec![stray], None, false).is_err());
    Ok(())
}

#[test]
fn test_neuron_bad_init_range() {
    let tape: Tape = Tape::new();
    let mut rng = StdRng::seed_from_u64(1);
    let config = LayerConfig::default().with_init(UniformInit::new(1.0, 0.0));
    assert!(matches!(
        Neuron::new(&tape, 2, true, &config, &mut rng),
        Err(AutogradError::InvalidConfig(_))
    ));
}

#[test]
fn test_zero_grad_resets_parameters() -> Result<(), AutogradError> {
    let tape: Tape = Tape::new();
    let n = fixed_neuron(&tape, false)?;
    n.forward_literals(&[1.0, 1.0])?.backward();
    assert!(n.parameters().iter().any(|p| p.grad() != 0.0));
    n.zero_grad();
    assert!(n.parameters().iter().all(|p| p.grad() == 0.0));
    Ok(())
}
