// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Larissa CLI entrypoint.
//!
//! By default this opens the interactive TUI, empty or with the given
//! document. `--inspect` parses a document and prints the reader view as
//! JSON instead (the host-UI data contract, useful for debugging ingestion).

use std::error::Error;
use std::path::PathBuf;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<document>]\n  {program} --demo\n  {program} --inspect <document>\n\nOpens the reader/workspace TUI. Supported document formats: txt, md, docx.\n\n--demo loads a built-in demo document and cannot be combined with a path.\n--inspect parses the document and prints the reader view as JSON to stdout."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    inspect: bool,
    document: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--inspect" => {
                if options.inspect {
                    return Err(());
                }
                let path = args.next().ok_or(())?;
                if options.document.is_some() {
                    return Err(());
                }
                options.inspect = true;
                options.document = Some(path);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.document.is_some() {
                    return Err(());
                }
                options.document = Some(arg);
            }
        }
    }

    if options.demo && options.document.is_some() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "larissa".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.inspect {
            let path = PathBuf::from(options.document.expect("inspect requires a path"));
            let document = larissa::ingest::parse_path(&path)?;
            let mut workspace = larissa::model::Workspace::new();
            workspace.load_document(document);
            let view = larissa::query::document_view(&workspace, None)
                .expect("freshly loaded workspace has a document");
            println!("{}", serde_json::to_string_pretty(&view)?);
            return Ok(());
        }

        let (workspace, source_path) = if options.demo {
            (larissa::tui::demo_workspace(), None)
        } else if let Some(document) = options.document {
            let path = PathBuf::from(document);
            let parsed = larissa::ingest::parse_path(&path)?;
            let mut workspace = larissa::model::Workspace::new();
            workspace.load_document(parsed);
            (workspace, Some(path))
        } else {
            (larissa::model::Workspace::new(), None)
        };

        larissa::tui::run_with_workspace(workspace, source_path)?;
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("larissa: {err}");
        std::process::exit(1);
    }
}
