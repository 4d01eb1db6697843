use generative_nn::{cos_fn, predict, train_generatively, GenerativeConfig, Network, Topology};

fn main() {
    // f(i) = i for i in 1..=16, windows of four predict the fifth
    let series: Vec<f64> = (1..=16).map(f64::from).collect();
    let inputs: Vec<Vec<f64>> = series.windows(5).map(|w| w[..4].to_vec()).collect();
    let expected: Vec<Vec<f64>> = series.windows(5).map(|w| vec![w[4]]).collect();

    let mut network = Network::new(&Topology::new(vec![4, 2, 1])).expect("valid topology");
    let config = GenerativeConfig::new(0.4, 500, 0.05, 8, 1.0);
    let report = train_generatively(&mut network, &inputs, &expected, &config).expect("single output");

    println!("warm-up: epoch {} error {:.6}", report.warmup.epoch, report.warmup.error);
    for row in &report.rows {
        println!("{:.4?}", row);
    }

    println!();
    for (row, target) in inputs.iter().zip(&expected) {
        let p = predict(&mut network, row, target[0]).expect("row fits");
        println!("x = {:.4}  y = {:.4}  want {:.4}", p.x, p.y, cos_fn(target[0]));
    }
}
