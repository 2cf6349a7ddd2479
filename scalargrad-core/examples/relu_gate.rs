// examples/relu_gate.rs
//!
//! Walks through the basic engine operations on two scalars, then builds a
//! small seeded MLP and fits it to a handful of points with plain gradient
//! descent. Run with `RUST_LOG=debug` to see the backward passes.

use rand::rngs::StdRng;
use rand::SeedableRng;
use scalargrad_core::{
    nn::{LayerConfig, Mlp, Module},
    ops::sum_op,
    AutogradError, Tape, Value,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Engine walkthrough:");
    let tape: Tape = Tape::new();
    let a = Value::new(&tape, 1.0);
    let b = Value::new(&tape, -2.0);

    let c = &a + &b;
    c.backward();
    println!("  c = a + b = {}, a.grad = {}, b.grad = {}", c.data(), a.grad(), b.grad());

    let f = c.relu();
    tape.zero_grad();
    f.backward();
    println!("  f = relu(c) = {}, a.grad = {}, b.grad = {}", f.data(), a.grad(), b.grad());

    println!("\nFitting y = x0 * x1 on four points...");
    let tape: Tape = Tape::new();
    let mut rng = StdRng::seed_from_u64(1337);
    let mlp = Mlp::new(&tape, 2, &[8, 8, 1], &LayerConfig::default(), &mut rng)?;
    println!("{:?} ({} parameters)", mlp, mlp.num_parameters());

    let xs = [[1.0, 1.0], [1.0, -1.0], [-1.0, 1.0], [-1.0, -1.0]];
    let ys = [1.0, -1.0, -1.0, 1.0];
    let epochs = 40;
    let learning_rate = 0.02;

    // everything recorded after this point is per-epoch scratch
    let mark = tape.checkpoint();
    for epoch in 0..epochs {
        mlp.zero_grad();
        let loss = loss(&mlp, &xs, &ys)?;
        loss.backward();
        for p in mlp.parameters() {
            p.set_data(p.data() - learning_rate * p.grad())?;
        }
        if epoch % 10 == 0 || epoch + 1 == epochs {
            println!("Epoch [{}/{}], Loss: {:.4}", epoch + 1, epochs, loss.data());
        }
        tape.truncate(mark);
    }
    println!("Training finished ({} nodes on the tape).", tape.len());
    Ok(())
}

fn loss(mlp: &Mlp, xs: &[[f64; 2]], ys: &[f64]) -> Result<Value, AutogradError> {
    let mut terms = Vec::with_capacity(xs.len());
    for (x, &y) in xs.iter().zip(ys) {
        let diff = mlp.forward_literals(x)? - y;
        terms.push(&diff * &diff);
    }
    sum_op(mlp.tape(), &terms)
}
