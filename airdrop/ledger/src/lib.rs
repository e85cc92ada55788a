mod ledger;
mod querier;
mod store;
mod validator;

pub use {ledger::*, querier::*, store::*, validator::*};
