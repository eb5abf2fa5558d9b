use crate::dynamodb::request::{self, Entry, ItemBuilder};
use crate::dynamodb::{Item, Store};
use crate::error::ValidationError;
use anyhow::Result;
use std::fmt::Display;
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{debug, info};

/// Raised when the input stream ends while a prompt is waiting.
#[derive(Error, Debug)]
#[error("input closed")]
pub struct InputClosed;

/// Line-oriented console over any reader and writer.
///
/// Prompts are written without a trailing newline and flushed; answers are
/// returned verbatim apart from the line terminator.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Shows `message` and reads one line of input.
    ///
    /// # Returns
    ///
    /// The entered line without its `\n` or `\r\n`, or an [`InputClosed`]
    /// error when there is nothing left to read.
    pub fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            return Err(InputClosed.into());
        }
        let line = input.strip_suffix('\n').unwrap_or(&input);
        let line = line.strip_suffix('\r').unwrap_or(line);
        Ok(line.to_string())
    }

    /// Writes one line of output.
    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Main menu entries, numbered as the operator types them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateTable,
    AddItem,
    DeleteItem,
    ListItems,
    FilterItems,
    Exit,
}

impl MenuChoice {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "1" => Some(Self::CreateTable),
            "2" => Some(Self::AddItem),
            "3" => Some(Self::DeleteItem),
            "4" => Some(Self::ListItems),
            "5" => Some(Self::FilterItems),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Runs the interactive menu until the operator exits or input ends.
///
/// Each round prints the menu, reads a choice and runs the matching operation
/// to completion before prompting again. Store and validation failures are
/// reported on the console and the menu comes back; only console I/O errors
/// end the loop with an error.
///
/// # Arguments
///
/// * `store` - The store every operation is sent to
/// * `console` - Where prompts are written and answers read
///
/// # Returns
///
/// Returns `Ok(())` on `6. Exit` or end of input.
pub async fn run<S, R, W>(store: &S, console: &mut Console<R, W>) -> Result<()>
where
    S: Store + ?Sized,
    R: BufRead,
    W: Write,
{
    loop {
        match menu_round(store, console).await {
            Ok(true) => continue,
            Ok(false) => break,
            Err(e) if e.is::<InputClosed>() => {
                debug!("Input closed, leaving the menu");
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// One pass through the menu. Returns `false` when the operator chose exit.
async fn menu_round<S, R, W>(store: &S, console: &mut Console<R, W>) -> Result<bool>
where
    S: Store + ?Sized,
    R: BufRead,
    W: Write,
{
    console.say("\n1. Create Table")?;
    console.say("2. Add Item")?;
    console.say("3. Delete Item")?;
    console.say("4. List Items")?;
    console.say("5. Filter Items")?;
    console.say("6. Exit")?;
    let choice = console.prompt("Make your choice: ")?;

    match MenuChoice::parse(&choice) {
        Some(MenuChoice::CreateTable) => create_table(store, console).await?,
        Some(MenuChoice::AddItem) => add_item(store, console).await?,
        Some(MenuChoice::DeleteItem) => delete_item(store, console).await?,
        Some(MenuChoice::ListItems) => list_items(store, console).await?,
        Some(MenuChoice::FilterItems) => filter_items(store, console).await?,
        Some(MenuChoice::Exit) => {
            console.say("Exiting...")?;
            return Ok(false);
        }
        None => console.say("Invalid choice, try again.")?,
    }
    Ok(true)
}

/// Creates a table from the operator's name, partition key and key type, and
/// waits for it to become active.
///
/// An unknown key type is reported as a table creation error without
/// contacting the store. `Creating table ...` is only printed once the store
/// has accepted the request.
async fn create_table<S, R, W>(store: &S, console: &mut Console<R, W>) -> Result<()>
where
    S: Store + ?Sized,
    R: BufRead,
    W: Write,
{
    let table_name = console.prompt("Enter the table name: ")?;
    let partition_key = console.prompt("Enter the Partition Key name: ")?;
    let key_type = console.prompt("Choose Partition Key type (S: string, N: number): ")?;

    let spec = match request::build_table_spec(&table_name, &partition_key, &key_type) {
        Ok(spec) => spec,
        Err(e) => return console.say(format!("Table creation error: {e}")),
    };

    if let Err(e) = store.create_table(&spec).await {
        return console.say(format!("Table creation error: {e}"));
    }
    console.say(format!("Creating table {table_name}..."))?;
    match store.wait_until_active(spec.name()).await {
        Ok(handle) => {
            info!("Table '{}' reports {}", handle.name, handle.status);
            console.say(format!("Table created: {table_name}"))
        }
        Err(e) => console.say(format!("Table creation error: {e}")),
    }
}

/// Adds an item built from the partition key and any number of additional
/// attributes.
///
/// Attribute names are read until the operator enters `q`. Values made only
/// of digits are stored as numbers, everything else as strings.
async fn add_item<S, R, W>(store: &S, console: &mut Console<R, W>) -> Result<()>
where
    S: Store + ?Sized,
    R: BufRead,
    W: Write,
{
    let table_name = console.prompt("Which table do you want to add data to? ")?;
    let partition_key = console.prompt("Enter the Partition Key name: ")?;
    let key_value = console.prompt(&format!("Enter the value for {partition_key}: "))?;

    let mut builder = ItemBuilder::new(&partition_key, &key_value);
    console.say("Add additional attributes. Enter 'q' to finish.")?;
    loop {
        let message = match builder.expects() {
            Entry::Name => "Enter the name of the attribute to add: ".to_string(),
            Entry::Value(name) => format!("Enter the value for {name}: "),
            Entry::Finished => break,
        };
        let token = console.prompt(&message)?;
        builder.accept(&token);
    }
    let item = builder.finish();

    match store.put_item(&table_name, &item).await {
        Ok(()) => console.say(format!("Item added: {item}")),
        Err(e) => console.say(format!("Error adding item: {e}")),
    }
}

/// Deletes the item addressed by the operator's partition key value.
async fn delete_item<S, R, W>(store: &S, console: &mut Console<R, W>) -> Result<()>
where
    S: Store + ?Sized,
    R: BufRead,
    W: Write,
{
    let table_name = console.prompt("Which table do you want to delete data from? ")?;
    let partition_key = console.prompt("Enter the Partition Key name: ")?;
    let key_value = console.prompt(&format!("Enter the value for {partition_key} to delete: "))?;

    let key = request::build_key(&partition_key, &key_value);
    match store.delete_item(&table_name, &key).await {
        Ok(()) => console.say(format!("Item deleted: {key}")),
        Err(e) => console.say(format!("Error deleting item: {e}")),
    }
}

async fn list_items<S, R, W>(store: &S, console: &mut Console<R, W>) -> Result<()>
where
    S: Store + ?Sized,
    R: BufRead,
    W: Write,
{
    let table_name = console.prompt("Which table do you want to list data from? ")?;

    match store.scan(&table_name).await {
        Ok(items) => {
            console.say(format!("Items in table {table_name}:"))?;
            print_items(console, &items)
        }
        Err(e) => console.say(format!("Error listing items: {e}")),
    }
}

/// Scans a table with a single comparison chosen from the filter menu.
///
/// The attribute name and value are always asked for, even when the filter
/// choice is invalid; an invalid choice is only reported afterwards and no
/// scan is sent.
async fn filter_items<S, R, W>(store: &S, console: &mut Console<R, W>) -> Result<()>
where
    S: Store + ?Sized,
    R: BufRead,
    W: Write,
{
    let table_name = console.prompt("Which table do you want to filter data from? ")?;

    console.say("Filter options:")?;
    console.say("1. Attribute equals a value")?;
    console.say("2. Attribute contains a substring")?;
    console.say("3. Attribute greater than a value")?;
    console.say("4. Attribute less than a value")?;
    let choice = console.prompt("Select a filter type (1-4): ")?;

    let attribute = console.prompt("Enter the attribute name to filter by: ")?;
    let value = console.prompt(&format!("Enter the value for {attribute}: "))?;

    let filter = match request::build_filter_expression(&choice, &attribute, &value) {
        Ok(filter) => filter,
        Err(ValidationError::InvalidFilterChoice(choice)) => {
            debug!("Rejected filter choice '{choice}'");
            return console.say("Invalid filter type. Returning to the menu.");
        }
        Err(e) => return console.say(e),
    };

    match store.scan_with_filter(&table_name, &filter).await {
        Ok(items) if items.is_empty() => console.say("No matching items found."),
        Ok(items) => {
            console.say(format!("Filtered items from table {table_name}:"))?;
            print_items(console, &items)
        }
        Err(e) => console.say(format!("Error filtering items: {e}")),
    }
}

fn print_items<R, W>(console: &mut Console<R, W>, items: &[Item]) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    items.iter().try_for_each(|item| console.say(item))
}
