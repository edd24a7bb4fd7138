use std::collections::HashMap;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use keymill::{
    compose_plate_program, keystem_array_step, serpentine_array_points, ArcDirection,
    BoreGenerator, BoreParameters, KeycrossParameters, KeystemParameters, KeysupParameters,
    PlateLayout, PlateParameters, Program, Statement,
};
use tracing::info;

fn main() -> Result<()> {
    keymill::init_logging()?;

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");
    match command {
        "bore" => run_bore(&Options::parse(&args[2..])?),
        "keystem" => run_keystem(&Options::parse(&args[2..])?),
        "plate" => run_plate(&Options::parse(&args[2..])?),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("Usage: keymill [bore|keystem|plate] [--option value ...]");
    println!("  bore     - Helically bore a round hole at the current position");
    println!("             (--diameter --depth --pitch --feedrate --endmill --direction)");
    println!("  keystem  - Cut an array of keycap stem mounts");
    println!("             (--arrayheight --arraywidth --arrayspace --depth --pitch");
    println!("              --feedrate --plungerate --clearance --endmill --ablpd)");
    println!("  plate    - Cut a full left-hand switch-mount plate");
    println!("             (--depth --pitch --feedrate --cutout --endmill");
    println!("              --output FILE, or --stats for layout JSON)");
    println!();
    println!("All dimensions in millimeters; G-code is written to stdout");
    println!("unless --output is given. Jog the machine to the work origin");
    println!("before running the output.");
}

/// Helically bore a hole at the current position.
fn run_bore(options: &Options) -> Result<()> {
    let params = BoreParameters {
        diameter: options.f64("diameter", 10.0)?,
        depth: options.f64("depth", 8.0)?,
        pitch: options.f64("pitch", 2.0)?,
        feed_rate: options.f64("feedrate", 500.0)?,
        endmill_diameter: options.f64("endmill", 3.0)?,
        direction: ArcDirection::from_str(&options.str("direction", "cw")).map_err(|e| anyhow!(e))?,
    };
    let commands = BoreGenerator::new(params).generate()?;

    let mut program = Program::new();
    program.push(Statement::UnitsMillimeters);
    program.push(Statement::PlaneXY);
    program.push(Statement::RelativePositioning);
    program.extend_motion(commands);

    print!("{}", program.to_gcode());
    Ok(())
}

/// Cut a serpentine array of keystem sites.
fn run_keystem(options: &Options) -> Result<()> {
    let endmill = options.f64("endmill", 1.0)?;
    let params = KeystemParameters {
        cross: KeycrossParameters {
            height: options.f64("crossheight", 4.5)?,
            width: options.f64("crosswidth", 4.5)?,
            height_thk: options.f64("crossheight-thk", 1.05)?,
            width_thk: options.f64("crosswidth-thk", 1.2)?,
            endmill,
        },
        support: KeysupParameters {
            height: options.f64("supheight", 5.2)?,
            width: options.f64("supwidth", 6.8)?,
            endmill,
        },
        depth: options.f64("depth", 3.5)?,
        pitch: options.f64("pitch", 1.0)?,
        feed_rate: options.f64("feedrate", 200.0)?,
        plunge_rate: options.f64("plungerate", 100.0)?,
        clearance: options.f64("clearance", 5.0)?,
        anti_backlash: options.bool("ablpd", false)?,
    };

    let rows = options.usize("arrayheight", 6)?;
    let cols = options.usize("arraywidth", 14)?;
    let spacing = options.f64("arrayspace", 1.0)?;
    let sites = serpentine_array_points(
        rows,
        cols,
        keystem_array_step(params.support.width, endmill, spacing),
        keystem_array_step(params.support.height, endmill, spacing),
    );

    // One keystem command sequence, replayed at every site.
    let commands = params.commands()?;
    info!(sites = sites.len(), "composing keystem batch");

    let mut program = Program::new();
    program.push(Statement::PlaneXY);
    program.push(Statement::UnitsMillimeters);
    program.push(Statement::AbsolutePositioning);
    program.push(Statement::RapidAbsolute {
        x: None,
        y: None,
        z: Some(params.clearance),
    });
    for site in &sites {
        program.push(Statement::RapidAbsolute {
            x: Some(site.x),
            y: Some(site.y),
            z: None,
        });
        program.push(Statement::RelativePositioning);
        program.extend_motion(commands.iter().copied());
        program.push(Statement::AbsolutePositioning);
    }

    print!("{}", program.to_gcode());
    Ok(())
}

/// Cut a full left-hand switch-mount plate.
fn run_plate(options: &Options) -> Result<()> {
    let layout = PlateLayout::left_hand();

    if options.flag("stats") {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    let params = PlateParameters {
        clearance: options.f64("clearance", 5.0)?,
        depth: options.f64("depth", 3.8)?,
        pitch: options.f64("pitch", 0.8)?,
        feed_rate: options.f64("feedrate", 480.0)?,
        plunge_rate: options.f64("plungerate", 100.0)?,
        cutout_width: options.f64("cutout", 13.25)?,
        endmill: options.f64("endmill", 1.0)?,
        boundary_pitch: options.f64("boundary-pitch", 1.0)?,
    };
    let program = compose_plate_program(&layout, &params)?;

    match options.get("output") {
        Some(path) => {
            std::fs::write(path, program.to_gcode())
                .with_context(|| format!("failed to write {path}"))?;
            info!(path = %path, statements = program.len(), "wrote plate program");
        }
        None => print!("{}", program.to_gcode()),
    }
    Ok(())
}

/// Parsed `--name value` command line options. A `--name` with no
/// value is treated as a flag.
struct Options(HashMap<String, String>);

impl Options {
    fn parse(args: &[String]) -> Result<Self> {
        let mut map = HashMap::new();
        let mut i = 0;
        while i < args.len() {
            let Some(name) = args[i].strip_prefix("--") else {
                bail!("unexpected argument: {} (expected --option)", args[i]);
            };
            if i + 1 < args.len() && !args[i + 1].starts_with("--") {
                map.insert(name.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                map.insert(name.to_string(), "true".to_string());
                i += 1;
            }
        }
        Ok(Self(map))
    }

    fn get(&self, name: &str) -> Option<&String> {
        self.0.get(name)
    }

    fn flag(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    fn str(&self, name: &str, default: &str) -> String {
        self.0
            .get(name)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn f64(&self, name: &str, default: f64) -> Result<f64> {
        match self.0.get(name) {
            Some(value) => value
                .parse()
                .with_context(|| format!("invalid value for --{name}: {value}")),
            None => Ok(default),
        }
    }

    fn usize(&self, name: &str, default: usize) -> Result<usize> {
        match self.0.get(name) {
            Some(value) => value
                .parse()
                .with_context(|| format!("invalid value for --{name}: {value}")),
            None => Ok(default),
        }
    }

    fn bool(&self, name: &str, default: bool) -> Result<bool> {
        match self.0.get(name).map(String::as_str) {
            None => Ok(default),
            Some("1") | Some("true") => Ok(true),
            Some("0") | Some("false") => Ok(false),
            Some(other) => bail!("invalid value for --{name}: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_pairs_and_flags() {
        let options = Options::parse(&args(&["--depth", "3.8", "--stats", "--pitch", "0.8"]))
            .unwrap();
        assert_eq!(options.f64("depth", 0.0).unwrap(), 3.8);
        assert_eq!(options.f64("pitch", 0.0).unwrap(), 0.8);
        assert!(options.flag("stats"));
        assert_eq!(options.f64("feedrate", 480.0).unwrap(), 480.0);
    }

    #[test]
    fn test_parse_negative_values() {
        let options = Options::parse(&args(&["--offset", "-2.5"])).unwrap();
        assert_eq!(options.f64("offset", 0.0).unwrap(), -2.5);
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Options::parse(&args(&["depth", "3.8"])).is_err());
    }

    #[test]
    fn test_rejects_malformed_numbers() {
        let options = Options::parse(&args(&["--depth", "deep"])).unwrap();
        assert!(options.f64("depth", 0.0).is_err());
    }

    #[test]
    fn test_bool_forms() {
        let options = Options::parse(&args(&["--ablpd", "1"])).unwrap();
        assert!(options.bool("ablpd", false).unwrap());
        let options = Options::parse(&args(&["--ablpd", "0"])).unwrap();
        assert!(!options.bool("ablpd", true).unwrap());
    }
}
