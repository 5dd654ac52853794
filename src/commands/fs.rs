//! Filesystem commands: `pwd`, `ls` and `cd`
//!
//! The three commands share one [`WorkingDir`]. Relative paths given to `ls`
//! and `cd` resolve against it.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use console_core::{Args, Command, CommandContext, Console, Error, Result};

/// Directory the filesystem commands work in
#[derive(Debug, Clone)]
pub struct WorkingDir {
    path: Rc<RefCell<PathBuf>>,
    /// Also move the process working directory on `cd`
    follow_process: bool,
}

impl WorkingDir {
    /// Start at `path` without touching the process working directory
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Rc::new(RefCell::new(path.into())),
            follow_process: false,
        }
    }

    /// Start at the process working directory and keep it in sync
    pub fn process() -> std::io::Result<Self> {
        Ok(Self {
            path: Rc::new(RefCell::new(std::env::current_dir()?)),
            follow_process: true,
        })
    }

    /// Current directory
    pub fn get(&self) -> PathBuf {
        self.path.borrow().clone()
    }

    fn resolve(&self, arg: &str) -> PathBuf {
        self.path.borrow().join(arg)
    }

    fn change_to(&self, dir: PathBuf) -> std::io::Result<()> {
        // Normalize "..", symlinks and the like so pwd prints a clean path
        let dir = dir.canonicalize()?;
        if self.follow_process {
            std::env::set_current_dir(&dir)?;
        }
        log::debug!("working directory is now {}", dir.display());
        *self.path.borrow_mut() = dir;
        Ok(())
    }
}

/// Register `pwd`, `ls` and `cd` on `console`
pub fn register(console: &mut Console, dir: &WorkingDir) {
    console.register_with_help(
        "pwd",
        "prints the working directory",
        Pwd { dir: dir.clone() },
    );
    console.register_with_help(
        "ls",
        "lists the working directory or the given paths",
        Ls { dir: dir.clone() },
    );
    console.register_with_help(
        "cd",
        "changes the working directory to <dir>",
        Cd { dir: dir.clone() },
    );
}

struct Pwd {
    dir: WorkingDir,
}

impl Command for Pwd {
    fn run(&mut self, ctx: &mut CommandContext<'_>, args: &str) -> Result<()> {
        if Args::new(args).count_args() > 0 {
            return Err(Error::Arity {
                command: "pwd".to_string(),
                expected: "does not take any arguments",
            });
        }
        write!(ctx, "{}", self.dir.get().display());
        Ok(())
    }
}

struct Ls {
    dir: WorkingDir,
}

impl Command for Ls {
    fn run(&mut self, ctx: &mut CommandContext<'_>, args: &str) -> Result<()> {
        let mut args = Args::new(args);
        if args.count_args() == 0 {
            let cwd = self.dir.get();
            list(ctx, &cwd, &cwd.display().to_string());
            return Ok(());
        }

        let mut first = true;
        while let Some(arg) = args.next_arg() {
            let arg = arg?;
            if !first {
                write!(ctx, "===> '{}'", arg);
            }
            first = false;
            list(ctx, &self.dir.resolve(arg), arg);
        }
        Ok(())
    }
}

/// Print a directory's entries, or the name of a file
///
/// `shown` is the path as the user typed it; entries are printed under it.
fn list(ctx: &mut CommandContext<'_>, path: &Path, shown: &str) {
    if path.is_dir() {
        match fs::read_dir(path) {
            Ok(entries) => {
                let mut names: Vec<String> = entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.file_name().to_string_lossy().into_owned())
                    .collect();
                names.sort();
                for name in names {
                    write!(ctx, "{}", Path::new(shown).join(name).display());
                }
            }
            Err(e) => write!(ctx, "Error: {}: {}", shown, e),
        }
    } else if path.exists() {
        ctx.write_line(shown);
    } else {
        write!(ctx, "Error: {}: no such file or directory", shown);
    }
}

struct Cd {
    dir: WorkingDir,
}

impl Command for Cd {
    fn run(&mut self, _ctx: &mut CommandContext<'_>, args: &str) -> Result<()> {
        let mut args = Args::new(args);
        match args.count_args() {
            0 => Ok(()),
            1 => {
                let Some(arg) = args.next_arg() else {
                    return Ok(());
                };
                let arg = arg?;
                let target = self.dir.resolve(arg);
                if !target.is_dir() {
                    return Err(Error::command(format!("{}: No such directory", arg)));
                }
                self.dir
                    .change_to(target)
                    .map_err(|e| Error::command(format!("{}: {}", arg, e)))
            }
            _ => Err(Error::InvalidArgument {
                command: "cd".to_string(),
                message: "too many arguments parsed to cd".to_string(),
            }),
        }
    }
}
