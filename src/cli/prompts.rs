//! Interactive prompts for each generation mode

use inquire::validator::Validation;
use inquire::{Confirm, CustomType, MultiSelect, Text};

use crate::error::{Result, WordForgeError};
use crate::generate::CharClass;
use crate::profile::{parse_list, TargetProfile};
use crate::types::{GenerationMode, GenerationRequest, LengthPolicy, LengthRange, RANDOM_DEFAULT_COUNT, RANDOM_MAX_COUNT};

/// Ask every question for `mode` and build the request
pub fn request_for(mode: GenerationMode) -> Result<GenerationRequest> {
    let policy = LengthPolicy::for_mode(mode);

    let request = match mode {
        GenerationMode::Smart => {
            let profile = profile()?;
            let range = length_range(&policy)?;
            let limit = line_limit(&policy)?;
            profile.request(mode, range, limit)?
        }
        GenerationMode::Brute => {
            let classes = char_classes()?;
            let range = length_range(&policy)?;
            let limit = line_limit(&policy)?;
            GenerationRequest {
                mode,
                classes,
                range,
                limit,
                ..Default::default()
            }
        }
        GenerationMode::Hybrid => {
            let profile = profile()?;
            let classes = char_classes()?;
            let range = length_range(&policy)?;
            let limit = line_limit(&policy)?;
            GenerationRequest {
                classes,
                ..profile.request(mode, range, limit)?
            }
        }
        GenerationMode::Random => {
            let random_length = bounded("Password length", policy.min_allowed, policy.max_allowed, policy.default_max)?;
            let random_count = bounded("How many", 1, RANDOM_MAX_COUNT, RANDOM_DEFAULT_COUNT)?;
            GenerationRequest {
                mode,
                random_length,
                random_count,
                ..Default::default()
            }
        }
    };

    Ok(request)
}

/// Personal details for the keyword mutator
pub fn profile() -> Result<TargetProfile> {
    Ok(TargetProfile {
        name: text("Target name")?,
        nickname: text("Nickname")?,
        birthdate: text_with_help("Date of birth", "ddmmyyyy or yyyy")?,
        pet: text("Pet name")?,
        partner: text("Partner name")?,
        favorite: text("Favorite word or thing")?,
        phone: text_with_help("Phone digits", "e.g. the last 4-6 digits")?,
        extras: parse_list(&text_with_help("Extra keywords", "comma separated")?),
        symbols: parse_list(&text_with_help("Symbols to include", "comma separated, e.g. @,!,$,#")?),
        numbers: parse_list(&text_with_help("Important numbers or years", "comma separated")?),
    })
}

/// Character classes, all selected by default. At least one is required.
pub fn char_classes() -> Result<Vec<CharClass>> {
    let all: Vec<usize> = (0..CharClass::ALL.len()).collect();
    let classes = MultiSelect::new("Character sets:", CharClass::ALL.to_vec())
        .with_default(&all)
        .with_validator(|selected: &[inquire::list_option::ListOption<&CharClass>]| {
            if selected.is_empty() {
                Ok(Validation::Invalid("Select at least one character set".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()?;
    Ok(classes)
}

pub fn length_range(policy: &LengthPolicy) -> Result<LengthRange> {
    let min = bounded("Minimum length", policy.min_allowed, policy.max_allowed, policy.default_min)?;
    let max = bounded(
        "Maximum length",
        min,
        policy.max_allowed,
        policy.default_max.max(min),
    )?;
    LengthRange::new(min, max)
}

pub fn line_limit(policy: &LengthPolicy) -> Result<u64> {
    CustomType::<u64>::new("Max lines to generate (0 = unlimited):")
        .with_default(0)
        .with_validator(at_most(policy.max_limit))
        .with_error_message("Please enter a whole number")
        .prompt()
        .map_err(WordForgeError::from)
}

/// Output file name, falling back to `<mode>.txt`
pub fn output_file(mode: GenerationMode) -> Result<String> {
    let default = format!("{}.txt", mode);
    let name = Text::new("Output filename:").with_default(&default).prompt()?;
    let name = name.trim();
    Ok(if name.is_empty() { default } else { name.to_string() })
}

pub fn confirm(message: &str) -> Result<bool> {
    Ok(Confirm::new(message).with_default(true).prompt()?)
}

fn text(message: &str) -> Result<String> {
    Ok(Text::new(&format!("{}:", message)).prompt()?.trim().to_string())
}

fn text_with_help(message: &str, help: &str) -> Result<String> {
    Ok(Text::new(&format!("{}:", message))
        .with_help_message(help)
        .prompt()?
        .trim()
        .to_string())
}

fn bounded<T>(message: &str, min: T, max: T, default: T) -> Result<T>
where
    T: Copy + PartialOrd + std::fmt::Display + std::str::FromStr + 'static,
{
    CustomType::<T>::new(&format!("{}:", message))
        .with_default(default)
        .with_help_message(&format!("{} to {}", min, max))
        .with_validator(move |value: &T| {
            if *value < min || *value > max {
                Ok(Validation::Invalid(format!("Enter a value between {} and {}", min, max).into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .with_error_message("Please enter a whole number")
        .prompt()
        .map_err(WordForgeError::from)
}

fn at_most(max: u64) -> impl Fn(&u64) -> std::result::Result<Validation, inquire::CustomUserError> + Clone {
    move |value: &u64| {
        if *value > max {
            Ok(Validation::Invalid(format!("Enter at most {}", max).into()))
        } else {
            Ok(Validation::Valid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_validator() {
        let check = at_most(10);
        assert!(matches!(check(&10), Ok(Validation::Valid)));
        assert!(matches!(check(&11), Ok(Validation::Invalid(_))));
    }
}
