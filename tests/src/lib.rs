#![cfg(test)]

mod hosts {
    mod integration;
}

mod scan {
    mod integration;
}
