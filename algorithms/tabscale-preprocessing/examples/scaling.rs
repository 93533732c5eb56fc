use ndarray::{array, Axis};
use tabscale_preprocessing::{ColumnScaler, MinMaxScaler, StandardScaler};

fn main() {
    // Rows are observations, columns are features
    let train = array![[0., 10.], [5., 20.], [10., 30.]];
    let test = array![[2.5, 25.], [12., 8.]];

    let mut scalers: Vec<(&str, Box<dyn ColumnScaler<f64>>)> = vec![
        ("min-max", Box::new(MinMaxScaler::<f64>::new())),
        ("standard", Box::new(StandardScaler::<f64>::new())),
    ];

    for (name, scaler) in scalers.iter_mut() {
        // Learn the column statistics from the training table
        let scaled_train = scaler.fit_transform(train.view()).unwrap();
        // Scale held out rows with the same statistics
        let scaled_test = scaler.transform(test.view()).unwrap();
        let restored = scaler.inverse_transform(scaled_test.view()).unwrap();

        println!("{} scaler", name);
        println!("  scaled training means: {}", scaled_train.mean_axis(Axis(0)).unwrap());
        println!("  scaled test rows:\n{}", scaled_test);
        println!("  restored test rows:\n{}", restored);
    }
}
