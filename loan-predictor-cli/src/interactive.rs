use std::io::{BufRead, Write};

use anyhow::Result;
use loan_flow::{Field, FieldKind, Outcome, SubmissionRunner, submit_label};
use tracing::debug;

/// Prompt for `field` until a non-blank answer arrives. `None` on end of input.
///
/// A choice answer matching an option case-insensitively is stored with the
/// option's spelling; anything else is stored as typed.
pub fn prompt_field<R: BufRead, W: Write>(
    field: Field,
    input: &mut R,
    out: &mut W,
) -> Result<Option<String>> {
    loop {
        match field.kind() {
            FieldKind::Choice(options) => {
                write!(out, "{field} [{}]: ", options.join(" / "))?
            }
            FieldKind::Number { placeholder } => write!(out, "{placeholder} ({field}): ")?,
        }
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim();
        if answer.is_empty() {
            writeln!(out, "{field} is required.")?;
            continue;
        }

        let value = match field.kind() {
            FieldKind::Choice(options) => options
                .iter()
                .find(|option| option.eq_ignore_ascii_case(answer))
                .map(|option| option.to_string())
                .unwrap_or_else(|| answer.to_string()),
            FieldKind::Number { .. } => answer.to_string(),
        };
        return Ok(Some(value));
    }
}

/// Run the form until the user quits or input ends.
pub async fn run<R: BufRead, W: Write>(
    runner: &SubmissionRunner,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Loan Approval Predictor")?;
    writeln!(out)?;

    for field in Field::FORM_ORDER {
        match prompt_field(field, input, out)? {
            Some(value) => runner.set(field, value).await,
            None => return Ok(()),
        }
    }

    loop {
        submit_and_show(runner, out).await?;

        loop {
            write!(out, "[e]dit a field, [s]ubmit again, [q]uit: ")?;
            out.flush()?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(());
            }
            match line.trim().to_ascii_lowercase().as_str() {
                "e" | "edit" => {
                    if !edit_field(runner, input, out).await? {
                        return Ok(());
                    }
                }
                "s" | "submit" => break,
                "q" | "quit" => return Ok(()),
                other => writeln!(out, "Unknown choice: {other}")?,
            }
        }
    }
}

async fn edit_field<R: BufRead, W: Write>(
    runner: &SubmissionRunner,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    write!(out, "Field name: ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }
    let field = match line.trim().parse::<Field>() {
        Ok(field) => field,
        Err(e) => {
            writeln!(out, "{e}")?;
            return Ok(true);
        }
    };
    match prompt_field(field, input, out)? {
        Some(value) => {
            debug!(field = %field, "field edited");
            runner.set(field, value).await;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Submit the current form and print the outcome.
pub async fn submit_and_show<W: Write>(runner: &SubmissionRunner, out: &mut W) -> Result<Outcome> {
    let form = runner.form().await;
    if let Err(e) = form.ensure_complete() {
        writeln!(out, "{e}")?;
        return Ok(Outcome::Hidden);
    }

    let ticket = runner.begin().await;
    writeln!(out, "{}", submit_label(&runner.snapshot().await))?;
    runner.complete(ticket).await;

    let outcome = Outcome::of(&runner.snapshot().await);
    if outcome.is_visible() {
        writeln!(out, "{outcome}")?;
    }
    Ok(outcome)
}
