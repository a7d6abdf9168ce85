//! Bucle de comandos.
//!
//! Hay dos modos excluyentes: batch, cuando se pasa `-commands`, e
//! interactivo, leyendo lineas de un prompt con edicion de linea.

use crate::cmd::{self, Flow};
use crate::Store;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::Write;
use tracing::{debug, error, info};

/// Separador de comandos en modo batch.
pub const BATCH_DELIMITER: char = ';';

/// Prompt del modo interactivo.
pub const PROMPT: &str = "> ";

/// Como termina el proceso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failure,
}

impl Exit {
    /// Codigo de salida del proceso.
    pub fn code(self) -> i32 {
        match self {
            Exit::Success => 0,
            Exit::Failure => 1,
        }
    }
}

/// Resultado de leer una linea del modo interactivo.
#[derive(Debug)]
pub enum ReadOutcome {
    Line(String),
    /// Fin de la entrada o interrupcion del usuario.
    Closed,
    /// Cualquier otro error de lectura.
    Failed(crate::Error),
}

/// Origen de lineas del modo interactivo.
pub trait LineSource {
    fn read_line(&mut self) -> ReadOutcome;
}

/// Prompt con edicion de linea e historial en memoria.
pub struct Prompt {
    editor: DefaultEditor,
}

impl Prompt {
    pub fn new() -> crate::Result<Prompt> {
        let editor = DefaultEditor::new()?;
        Ok(Prompt { editor })
    }
}

impl LineSource for Prompt {
    fn read_line(&mut self) -> ReadOutcome {
        match self.editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(err) = self.editor.add_history_entry(line.as_str()) {
                        debug!(cause = %err, "failed to add history entry");
                    }
                }
                ReadOutcome::Line(line)
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => ReadOutcome::Closed,
            Err(err) => ReadOutcome::Failed(err.into()),
        }
    }
}

/// Ejecuta los comandos de `commands` separados por `;` en orden.
///
/// Se detiene en el primer `exit`; en otro caso procesa todos y retorna
/// `Flow::Continue`.
pub fn batch<S, W>(store: &mut S, commands: &str, dst: &mut W) -> Flow
where
    S: Store + ?Sized,
    W: Write + ?Sized,
{
    for line in commands.split(BATCH_DELIMITER) {
        if cmd::handle_line(store, line, dst) == Flow::Exit {
            return Flow::Exit;
        }
    }

    Flow::Continue
}

/// Lee y procesa lineas de `source` hasta `exit`, el fin de la entrada o un
/// error de lectura.
pub fn interactive<S, L, W>(store: &mut S, source: &mut L, dst: &mut W) -> Exit
where
    S: Store + ?Sized,
    L: LineSource + ?Sized,
    W: Write + ?Sized,
{
    loop {
        let line = match source.read_line() {
            ReadOutcome::Line(line) => line,
            ReadOutcome::Closed => {
                info!("input closed, exiting...");
                return Exit::Success;
            }
            ReadOutcome::Failed(err) => {
                error!(cause = %err, "error reading input");
                return Exit::Failure;
            }
        };

        if cmd::handle_line(store, &line, dst) == Flow::Exit {
            return Exit::Success;
        }
    }
}

/// Comprueba el servidor y ejecuta el bucle de comandos.
///
/// Si el `PING` inicial falla se retorna `Exit::Failure` sin llegar a abrir
/// el origen de lineas. Con `commands` se ejecuta el batch; si no, se abre
/// el origen con `open_source` y se entra en modo interactivo.
pub fn run<S, L, F, W>(store: &mut S, commands: Option<&str>, open_source: F, dst: &mut W) -> Exit
where
    S: Store + ?Sized,
    L: LineSource,
    F: FnOnce() -> crate::Result<L>,
    W: Write + ?Sized,
{
    info!("Attempting to connect to Redis...");
    if let Err(err) = store.ping() {
        error!(cause = %err, "Failed to connect to Redis");
        return Exit::Failure;
    }
    info!("Successfully connected to Redis");

    match commands {
        Some(commands) => {
            batch(store, commands, dst);
            Exit::Success
        }
        None => {
            let mut source = match open_source() {
                Ok(source) => source,
                Err(err) => {
                    error!(cause = %err, "error creating readline");
                    return Exit::Failure;
                }
            };

            interactive(store, &mut source, dst)
        }
    }
}
