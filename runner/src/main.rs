// Copyright (c) The Heisenberg Authors.
// Licensed under the MIT License.

#![deny(clippy::all, clippy::pedantic)]

fn main() -> Result<(), String> {
    heisenberg_runner::main(None::<Vec<String>>)
}
