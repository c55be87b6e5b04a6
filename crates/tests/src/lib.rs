

#[cfg(test)]
mod case_create_tests;

#[cfg(test)]
mod case_update_tests;

#[cfg(test)]
mod case_file_tests;

#[cfg(test)]
mod records_tests;

#[cfg(test)]
mod reference_tests;
