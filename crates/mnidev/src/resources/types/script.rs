use std::collections::BTreeMap;

/// The commands of one named script, unparsed.
pub type Script = Vec<String>;

/// A text file of named scripts.
///
/// A script starts with a line holding its name and runs until a `//END`
/// line. Lines in between are commands, most of which start with `//`.
/// Lines outside of any script are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBundle {
    scripts: BTreeMap<String, Script>,
}

const END_MARKER: &str = "//END";

impl ScriptBundle {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut scripts = BTreeMap::new();
        let mut current: Option<(String, Script)> = None;

        for line in text.lines().map(str::trim) {
            if line.is_empty() {
                continue;
            }
            match current.take() {
                Some((name, commands)) if line.eq_ignore_ascii_case(END_MARKER) => {
                    if scripts.contains_key(&name) {
                        log::warn!("Script {name} is defined more than once");
                    }
                    scripts.insert(name, commands);
                }
                Some((name, mut commands)) => {
                    commands.push(line.to_owned());
                    current = Some((name, commands));
                }
                None if line.starts_with("//") => {
                    log::debug!("Ignoring command outside of a script: {line}");
                }
                None => current = Some((line.to_owned(), Vec::new())),
            }
        }
        if let Some((name, _)) = current {
            log::warn!("Script {name} is missing its {END_MARKER} line");
        }
        ScriptBundle { scripts }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Script> {
        self.scripts.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scripts.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}
