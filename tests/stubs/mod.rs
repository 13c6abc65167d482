pub mod datapoints;
