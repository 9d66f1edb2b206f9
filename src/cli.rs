use std::path::PathBuf;

pub const USAGE: &str = "\
Usage:
  stylist analyze <image>
  stylist prompt <image> [--occasion <text>] [--aesthetic <text>] [--preferences <text>]
  stylist --help

Commands:
  analyze   Classify skin tone, undertone and season from a photo
  prompt    Classify a photo and print the outfit completion request

Settings are read from stylist.toml (or $STYLIST_CONFIG) and STYLIST_* variables.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Analyze {
        image: PathBuf,
    },
    Prompt {
        image: PathBuf,
        occasion: Option<String>,
        aesthetic: Option<String>,
        preferences: Option<String>,
    },
    Help,
}

impl Command {
    /// Parse arguments, excluding the program name.
    pub fn parse(args: &[String]) -> Result<Self, String> {
        let Some(command) = args.first() else {
            return Err("No command given".to_string());
        };

        match command.as_str() {
            "--help" | "-h" | "help" => Ok(Command::Help),
            "analyze" => match &args[1..] {
                [image] => Ok(Command::Analyze {
                    image: PathBuf::from(image),
                }),
                [] => Err("Missing image path".to_string()),
                _ => Err("analyze takes exactly one image path".to_string()),
            },
            "prompt" => Self::parse_prompt(&args[1..]),
            other => Err(format!("Unknown command: {other}")),
        }
    }

    fn parse_prompt(args: &[String]) -> Result<Self, String> {
        let mut image = None;
        let mut occasion = None;
        let mut aesthetic = None;
        let mut preferences = None;

        let mut i = 0;
        while i < args.len() {
            let slot = match args[i].as_str() {
                "--occasion" => &mut occasion,
                "--aesthetic" => &mut aesthetic,
                "--preferences" => &mut preferences,
                arg if !arg.starts_with("--") => {
                    if image.is_some() {
                        return Err("Multiple image paths provided".to_string());
                    }
                    image = Some(PathBuf::from(arg));
                    i += 1;
                    continue;
                }
                arg => return Err(format!("Unknown option: {arg}")),
            };

            let value = args
                .get(i + 1)
                .ok_or_else(|| format!("{} requires a value", args[i]))?;
            *slot = Some(value.clone());
            i += 2;
        }

        let image = image.ok_or_else(|| "Missing image path".to_string())?;
        Ok(Command::Prompt {
            image,
            occasion,
            aesthetic,
            preferences,
        })
    }
}
