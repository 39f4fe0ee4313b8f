/*!
Command dispatcher modules, one per verb.

Layout:
  src/cmd/
    mod.rs      (this file: module declarations + re-exports)
    add.rs      (AddArgs     + execute_add)
    update.rs   (UpdateArgs  + execute_update)
    delete.rs   (DeleteArgs  + execute_delete)
    list.rs     (ListArgs    + execute_list)
    get.rs      (GetArgs     + execute_get)
    connect.rs  (ConnectArgs + execute_connect)
    shared.rs   (ProfileFlags, UsageError, JSON view, confirmations)
    format.rs   (color / glyph styling, record line rendering)

Conventions:
  - Each subcommand module exposes one public `execute_*` function that takes
    the opened `Store` and returns `anyhow::Result`.
  - Each argument struct derives `clap::Args` and has a `validate()` that runs
    before the store is opened, so usage errors never touch disk.
*/

pub mod add;
pub mod connect;
pub mod delete;
pub mod format;
pub mod get;
pub mod list;
pub mod shared;
pub mod update;

pub use add::{AddArgs, execute_add};
pub use connect::{ConnectArgs, execute_connect};
pub use delete::{DeleteArgs, execute_delete};
pub use get::{GetArgs, execute_get};
pub use list::{ListArgs, execute_list};
pub use shared::UsageError;
pub use update::{UpdateArgs, execute_update};
