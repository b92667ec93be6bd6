//! Scenario tests across options, groups and sets.

mod scenarios;
