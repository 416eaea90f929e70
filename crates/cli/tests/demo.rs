//! End-to-end demo run on a CSV file

use classifier::ThresholdClassifier;
use cli::{run, DemoConfig, LabelColumn};
use feature_engine::FittedPipeline;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("feature-synth-{}-{}", std::process::id(), name))
}

/// Small banknote-shaped dataset: four features, class label last
fn write_dataset(path: &PathBuf) {
    let mut csv = String::from("variance,skewness,curtosis,entropy,class\n");
    for i in 0..40 {
        let t = i as f64;
        let class = i % 2;
        let offset = if class == 0 { 3.0 } else { -3.0 };
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            offset + (t * 0.1).sin(),
            offset * 2.0 + (t * 0.2).cos(),
            1.0 + (t * 0.3).sin(),
            -0.5 + (t * 0.05).cos(),
            class
        ));
    }
    std::fs::write(path, csv).unwrap();
}

#[test]
fn test_run_reference_expression() {
    let data_path = temp_path("banknote.csv");
    let model_path = temp_path("pipeline.bin");
    write_dataset(&data_path);

    let config = DemoConfig {
        data_path: data_path.clone(),
        model_path: Some(model_path.clone()),
        ..Default::default()
    };
    let report = run(&config).unwrap();

    assert_eq!(report.samples, 40);
    assert_eq!(report.base_features, 4);
    assert_eq!(report.bounds.len(), 7);
    assert_eq!(report.scorecard.samples, 40);
    assert!(report.scorecard.accuracy >= 0.0 && report.scorecard.accuracy <= 1.0);
    assert_eq!(report.previews.len(), 3);
    assert_eq!(report.previews[2].row, 39);

    // the saved pipeline reproduces the reported scores
    let pipeline = FittedPipeline::load_from_file(&model_path).unwrap();
    let contents = std::fs::read_to_string(&data_path).unwrap();
    let last_line = contents.lines().last().unwrap();
    let fields: Vec<f64> = last_line.split(',').map(|v| v.parse().unwrap()).collect();
    let score = pipeline.predict(&fields[..4]).unwrap();
    assert_eq!(score.to_bits(), report.previews[2].score.to_bits());

    std::fs::remove_file(&data_path).ok();
    std::fs::remove_file(&model_path).ok();
}

#[test]
fn test_run_separates_classes() {
    let data_path = temp_path("separable.csv");
    write_dataset(&data_path);

    // class 0 rows have large F1 + F2, class 1 rows small
    let config = DemoConfig {
        data_path: data_path.clone(),
        expression: "F1+F2".to_string(),
        classifier: ThresholdClassifier::new(1.0),
        ..Default::default()
    };
    let report = run(&config).unwrap();
    std::fs::remove_file(&data_path).ok();

    assert_eq!(report.scorecard.correct, 40);
    assert_eq!(report.scorecard.mae, 0.0);
}

#[test]
fn test_run_label_first() {
    let data_path = temp_path("label-first.csv");
    std::fs::write(&data_path, "1,0.0,0.0\n0,2.0,2.0\n").unwrap();

    let config = DemoConfig {
        data_path: data_path.clone(),
        has_header: false,
        label_column: LabelColumn::First,
        expression: "F1*F2".to_string(),
        classifier: ThresholdClassifier::new(0.5),
        ..Default::default()
    };
    let report = run(&config).unwrap();
    std::fs::remove_file(&data_path).ok();

    assert_eq!(report.base_features, 2);
    assert_eq!(report.scorecard.correct, 2);
}

#[test]
fn test_run_missing_file() {
    let config = DemoConfig {
        data_path: temp_path("missing.csv"),
        ..Default::default()
    };
    let err = run(&config).unwrap_err();
    assert!(format!("{:#}", err).contains("missing.csv"));
}
