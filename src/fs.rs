use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::level::Level;
use crate::LoadLevel;

impl<P: AsRef<Path> + ?Sized> LoadLevel for P {
    fn load_level(&self) -> Result<Level, Box<dyn Error>> {
        let mut file = File::open(self)?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(contents.parse::<Level>()?)
    }
}
