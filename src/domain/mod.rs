pub mod catalog;
pub mod city;
pub mod lookup;
