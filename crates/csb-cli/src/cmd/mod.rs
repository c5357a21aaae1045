pub mod inline;
pub mod run;
pub mod scenarios;
pub mod sim;
