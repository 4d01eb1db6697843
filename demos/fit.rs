use std::sync::mpsc;
use std::thread;

use generative_nn::{train, EpochStats, Network, Topology, TrainConfig};

fn main() {
    let mut network = Network::new(&Topology::new(vec![2, 2, 1])).expect("valid topology");

    let inputs = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
    let expected_outputs = vec![vec![0.0], vec![1.0]];

    let (tx, rx) = mpsc::channel::<EpochStats>();
    let printer = thread::spawn(move || {
        for stats in rx {
            if stats.epoch % 1000 == 0 {
                println!("Epoch {}: error = {:.6}", stats.epoch, stats.error);
            }
        }
    });

    let config = TrainConfig::new(0.5, 10_000, 0.01).with_progress(tx);
    let report = train(&mut network, &inputs, &expected_outputs, &config).expect("well-formed data");
    drop(config);
    printer.join().expect("printer thread");

    println!("Stopped at epoch {} (converged: {})", report.epoch, report.converged);
    for input in &inputs {
        network.set_inputs(input).expect("row fits");
        network.forward();
        println!("Input: {:?} -> Output: {:.4}", input, network.outputs().expect("output layer")[0]);
    }
}
