mod helpers;
mod test_smoke_flows;
mod test_social;
