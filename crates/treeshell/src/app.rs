use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tree_render::RenderModel;
use tree_service::{Request, Response};
use tree_store::Document;

use crate::commands::{Command, HELP};
use crate::config::ShellConfig;
use crate::transport::Transport;
use crate::ui;

/// The shell's view of the tree
///
/// `document` is the last tree the service sent and `model` mirrors it with
/// the local collapse state. Both are replaced only by a successful response,
/// never updated ahead of the service.
pub struct TreeShell<T: Transport> {
    /// Connection to the service
    transport: T,

    /// Session settings
    config: ShellConfig,

    /// Last tree received
    document: Document,

    /// Mirror of `document` with collapse state
    model: RenderModel,
}

impl<T: Transport> TreeShell<T> {
    /// Create a shell and fetch the current tree
    pub fn connect(transport: T, config: ShellConfig) -> Result<Self> {
        let mut shell = Self {
            transport,
            config,
            document: Document::empty(),
            model: RenderModel::default(),
        };
        shell.refresh()?;
        Ok(shell)
    }

    /// The last tree received from the service
    #[cfg(test)]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The local mirror
    #[cfg(test)]
    pub fn model(&self) -> &RenderModel {
        &self.model
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch the tree again and rebuild the mirror, dropping collapse state
    pub fn refresh(&mut self) -> Result<()> {
        let document = self.fetch()?;
        self.accept(document);
        Ok(())
    }

    /// Run one command, returning the text to show
    ///
    /// Errors reported by the service come back as `Err` carrying the
    /// service's message unchanged.
    pub fn execute(&mut self, command: Command) -> Result<String> {
        debug!("Executing {:?}", command);

        match command {
            Command::CreateRoot(name) => self.mutate(Request::CreateRoot { name }),
            Command::Add { parent, name } => self.mutate(Request::AddNode {
                parent_name: parent,
                name,
            }),
            Command::Delete(name) => self.mutate(Request::DeleteNode { node_name: name }),
            Command::Move { name, new_parent } => self.mutate(Request::MoveNode {
                node_name: name,
                new_parent_name: new_parent,
            }),
            Command::Compare(a, b) => self.compare(a, b),
            Command::Load(path) => {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                self.mutate(Request::LoadTree { contents })
            }
            Command::Save(path) => self.save(path),
            Command::Toggle(name) => match self.model.toggle(&name) {
                Some(_) => Ok(self.draw()),
                None => bail!("Node not found: {}", name),
            },
            Command::ToggleAll => {
                let document = self.fetch()?;
                self.model = RenderModel::toggle_all(&document);
                self.document = document;
                Ok(self.draw())
            }
            Command::ExpandAll => {
                let document = self.fetch()?;
                self.model = RenderModel::expand_all(&document);
                self.document = document;
                Ok(self.draw())
            }
            Command::Show => Ok(self.draw()),
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => Ok(String::new()),
        }
    }

    /// Read commands from `input` until it ends or `quit`, writing results
    /// and errors to `output`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "{}", self.draw())?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line.context("Failed to read input")?;

            let text = match Command::parse(&line) {
                Ok(None) => None,
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => Some(
                    self.execute(command)
                        .unwrap_or_else(|err| format!("{err:#}")),
                ),
                Err(err) => Some(err.to_string()),
            };

            if let Some(text) = text {
                writeln!(output, "{}", text)?;
            }
            write!(output, "> ")?;
            output.flush()?;
        }

        writeln!(output)?;
        Ok(())
    }

    fn draw(&self) -> String {
        ui::draw(&self.model.to_drawable(&self.config.render.layout()))
    }

    fn send(&mut self, request: Request) -> Result<Response> {
        let response = self.transport.send(&request)?;
        match response {
            Response::Error { error } => Err(anyhow!(error)),
            response => Ok(response),
        }
    }

    fn fetch(&mut self) -> Result<Document> {
        match self.send(Request::GetTree)? {
            Response::Tree(document) => Ok(document),
            other => bail!("Unexpected response to get_tree: {:?}", other),
        }
    }

    fn accept(&mut self, document: Document) {
        self.model = RenderModel::build(&document);
        self.document = document;
    }

    fn mutate(&mut self, request: Request) -> Result<String> {
        let op = request.op();
        match self.send(request)? {
            Response::Tree(document) => {
                self.accept(document);
                Ok(self.draw())
            }
            other => bail!("Unexpected response to {}: {:?}", op, other),
        }
    }

    fn compare(&mut self, a: String, b: String) -> Result<String> {
        match self.send(Request::CompareNodes {
            node_name1: a,
            node_name2: b,
        })? {
            Response::Differences { differences } => Ok(ui::differences(&differences)),
            other => bail!("Unexpected response to compare_nodes: {:?}", other),
        }
    }

    fn save(&mut self, path: Option<PathBuf>) -> Result<String> {
        match self.send(Request::SaveTree)? {
            Response::Download { filename, contents } => {
                let path = path.unwrap_or_else(|| PathBuf::from(filename));
                std::fs::write(&path, contents)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Saved tree to {}", path.display());
                Ok(format!("Saved to {}", path.display()))
            }
            Response::Status { status } => Ok(status),
            other => bail!("Unexpected response to save_tree: {:?}", other),
        }
    }
}
