pub mod winogrande;
