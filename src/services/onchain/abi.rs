//! Solidity interfaces of the deployed indexer contracts.

use alloy::sol;

sol! {
	interface IErc20Indexer {
		function get(address token, address owner, address spender)
			external
			view
			returns (string memory n, string memory s, uint8 d, uint256 ts, uint256 bal, uint256 alw);

		function getBatch(address[] calldata tokens, address owner, address spender)
			external
			view
			returns (
				string[] memory names,
				string[] memory symbols,
				uint8[] memory decimalsList,
				uint256[] memory totalSupplies,
				uint256[] memory balances,
				uint256[] memory allowances
			);
	}

	interface IAddressIndexer {
		function get(address account)
			external
			view
			returns (uint256 bal, bool isContract, bytes32 codehash);

		function getBatch(address[] calldata accounts)
			external
			view
			returns (uint256[] memory balances, bool[] memory isContracts, bytes32[] memory codehashes);
	}

	interface IUniswapV2Indexer {
		struct PairView {
			address pair;
			address token0;
			address token1;
			uint256 reserve0;
			uint256 reserve1;
			uint256 price0;
			uint256 price1;
		}

		function findPair(address factory, address tokenA, address tokenB)
			external
			view
			returns (bool found, PairView memory pairView);

		function findPairsForTokenInFactory(address factory, address token, uint256 offset, uint256 limit)
			external
			view
			returns (PairView[] memory results, uint256 nextOffset, uint256 totalPairs);

		function findPairsForTokenAgainstBases(
			address factory,
			address token,
			address[] calldata bases,
			uint256 offset,
			uint256 limit
		)
			external
			view
			returns (PairView[] memory results, uint256 nextOffset);
	}
}
