use std::path::PathBuf;

pub struct ValidateArgs {
    pub path: PathBuf,
}

pub struct TransformArgs {
    pub path: PathBuf,
    pub values: Vec<f64>,
}

pub struct ProcessArgs {
    pub datapoints: PathBuf,
    pub readings: PathBuf,
    pub publish: bool,
}

pub struct PublishConfigArgs {
    pub org_id: i64,
    pub path: PathBuf,
}
