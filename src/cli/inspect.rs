//! Debugging commands: sexp, config

use super::util::NameArgs;
use regshift::*;
use std::fs;
use std::path::Path;

pub fn cmd_sexp(file: &Path) -> Result<()> {
    let source = fs::read_to_string(file).map_err(|e| Error::from(e).in_file(file))?;
    println!("{}", to_sexp(&source)?);
    Ok(())
}

pub fn cmd_config(names: &NameArgs) -> Result<()> {
    let config = names.to_config();
    config.validate()?;
    print!("{}", config.to_yaml()?);
    Ok(())
}
